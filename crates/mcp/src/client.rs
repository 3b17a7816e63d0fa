//! Request/response exchange with the supervised server.

use std::time::Duration;

use serde_json::{Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ids::RequestIdAllocator;
use crate::protocol::{self, JsonRpcRequest};
use crate::supervisor::{ProcessState, ProcessSupervisor, ServerConfig};

/// Client for one server process.
///
/// Calls are serialized: the supervisor and id allocator sit behind one
/// async mutex, so exactly one request is on the wire at a time and
/// responses are matched to requests by order.
pub struct Client {
    inner: Mutex<Inner>,
    timeout: Duration,
}

struct Inner {
    supervisor: ProcessSupervisor,
    ids: RequestIdAllocator,
}

impl Client {
    /// Create a client; the server is started lazily on the first call.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_supervisor(ProcessSupervisor::new(config))
    }

    pub fn with_supervisor(supervisor: ProcessSupervisor) -> Self {
        let timeout = supervisor.config().request_timeout;
        Self {
            inner: Mutex::new(Inner {
                supervisor,
                ids: RequestIdAllocator::new(),
            }),
            timeout,
        }
    }

    /// Send one request and wait for its response, using the configured timeout.
    pub async fn call(&self, method: &str, params: Map<String, Value>) -> Result<Value> {
        self.call_with_timeout(method, params, self.timeout).await
    }

    /// Send one request and wait at most `limit` for its response.
    ///
    /// A timeout or closed pipe is a transport error and kills the current
    /// process; the next call spawns a new one. Nothing is retried.
    pub async fn call_with_timeout(
        &self,
        method: &str,
        params: Map<String, Value>,
        limit: Duration,
    ) -> Result<Value> {
        let mut inner = self.inner.lock().await;
        let Inner { supervisor, ids } = &mut *inner;

        supervisor.ensure_running().await?;

        let id = ids.next();
        let request = JsonRpcRequest::new(id, method, params);
        let line = protocol::encode(&request)?;
        debug!(id, method, "sending request");

        let exchanged = timeout(limit, round_trip(supervisor, &line)).await;
        let response = match exchanged {
            Ok(Ok(response)) => response,
            Ok(Err(reason)) => {
                let diagnostics = supervisor.discard().await;
                return Err(Error::transport(reason, diagnostics));
            }
            Err(_) => {
                warn!(id, method, timeout_ms = limit.as_millis() as u64, "request timed out");
                let diagnostics = supervisor.discard().await;
                return Err(Error::transport(
                    format!("no response within {}ms", limit.as_millis()),
                    diagnostics,
                ));
            }
        };
        supervisor.finish_request();

        let response = match String::from_utf8(response) {
            Ok(text) => text,
            Err(e) => {
                return Err(Error::Protocol {
                    line: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                    diagnostics: supervisor.diagnostics(),
                });
            }
        };

        let outcome = protocol::decode_response(&response, Some(id), || supervisor.diagnostics());
        debug!(id, ok = outcome.is_ok(), "received response");
        outcome
    }

    /// Start the server now instead of on the first call.
    pub async fn ensure_running(&self) -> Result<()> {
        self.inner.lock().await.supervisor.ensure_running().await
    }

    pub async fn is_alive(&self) -> bool {
        self.inner.lock().await.supervisor.is_alive()
    }

    pub async fn state(&self) -> ProcessState {
        self.inner.lock().await.supervisor.state()
    }

    /// Number of server processes spawned by this client.
    pub async fn spawn_count(&self) -> u64 {
        self.inner.lock().await.supervisor.spawn_count()
    }

    /// Terminate the server process, if any.
    pub async fn shutdown(&self) {
        self.inner.lock().await.supervisor.stop().await;
    }
}

/// Write one request line and read one response line of at most
/// `max_response_size` bytes.
async fn round_trip(
    supervisor: &mut ProcessSupervisor,
    line: &str,
) -> std::result::Result<Vec<u8>, String> {
    let max = supervisor.config().max_response_size;
    let (stdin, stdout) = supervisor
        .begin_request()
        .ok_or_else(|| "server is not running".to_string())?;

    stdin
        .write_all(line.as_bytes())
        .await
        .map_err(|e| format!("failed to write request: {e}"))?;
    stdin
        .flush()
        .await
        .map_err(|e| format!("failed to flush request: {e}"))?;

    let mut response = Vec::new();
    let bytes_read = stdout
        .take((max as u64).saturating_add(1))
        .read_until(b'\n', &mut response)
        .await
        .map_err(|e| format!("failed to read response: {e}"))?;
    if bytes_read == 0 {
        return Err("no response received from server".to_string());
    }
    if response.len() > max && !response.ends_with(b"\n") {
        return Err(format!("response exceeds {max} bytes"));
    }
    Ok(response)
}
