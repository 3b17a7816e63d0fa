//! Server process lifecycle (spawn, liveness, restart, stop).

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::paths::DataDirs;

/// Server launcher looked up next to the client executable.
pub const DEFAULT_SERVER_SCRIPT: &str = "mcp-server.sh";

/// Time the server gets to crash before it is considered started.
pub const DEFAULT_STARTUP_GRACE: Duration = Duration::from_secs(1);

/// Default upper bound on one request/response exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default log directive passed to the server as `RUST_LOG`.
pub const DEFAULT_SERVER_LOG: &str = "web_scrape_mcp=debug,info";

/// Default upper bound on one response line, newline included.
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;

/// Retained stderr is capped to its most recent 1MB.
pub const MAX_DIAGNOSTICS_SIZE: usize = 1024 * 1024;

/// How long to wait for stderr to reach EOF after the process is gone.
const DIAGNOSTICS_FLUSH: Duration = Duration::from_millis(500);

/// Configuration for the server process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub command: PathBuf,
    pub args: Vec<String>,
    /// Extra environment, applied after the standard variables.
    pub env: HashMap<String, String>,
    pub dirs: DataDirs,
    /// Value of `RUST_LOG` in the server's environment.
    pub log_filter: String,
    pub startup_grace: Duration,
    /// Additional spawn attempts after a startup failure.
    pub startup_retries: u32,
    /// Delay before the first retry; doubles on each further attempt.
    pub startup_backoff: Duration,
    pub request_timeout: Duration,
    /// Longest response line accepted before the exchange is abandoned.
    pub max_response_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: Vec::new(),
            env: HashMap::new(),
            dirs: DataDirs::default(),
            log_filter: DEFAULT_SERVER_LOG.to_string(),
            startup_grace: DEFAULT_STARTUP_GRACE,
            startup_retries: 1,
            startup_backoff: Duration::from_millis(250),
            request_timeout: DEFAULT_TIMEOUT,
            max_response_size: MAX_RESPONSE_SIZE,
        }
    }
}

/// `mcp-server.sh` in the directory holding the running executable.
pub fn default_command() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_SERVER_SCRIPT)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SERVER_SCRIPT))
}

/// Observable lifecycle state of the supervised process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    NotStarted,
    Running,
    Exited,
}

enum Handle {
    NotStarted,
    Running(ProcessHandle),
    Exited,
}

/// One spawned server and its pipes.
struct ProcessHandle {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    stderr: StderrDrain,
    /// Set while a request is between write and response. Still set on the
    /// next `ensure_running` means the caller abandoned the call mid-flight.
    in_flight: bool,
}

/// Background reader that keeps the stderr pipe empty and remembers its text.
struct StderrDrain {
    buffer: Arc<Mutex<String>>,
    task: Option<JoinHandle<()>>,
}

impl StderrDrain {
    fn spawn(stderr: ChildStderr) -> Self {
        let buffer = Arc::new(Mutex::new(String::new()));
        let sink = Arc::clone(&buffer);

        let task = tokio::spawn(async move {
            let mut reader = BufReader::new(stderr);
            let mut line = Vec::new();
            loop {
                line.clear();
                match reader.read_until(b'\n', &mut line).await {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {
                        let text = String::from_utf8_lossy(&line);
                        debug!(target: "mcp::server", "{}", text.trim_end());
                        let mut buffer = sink.lock().unwrap_or_else(PoisonError::into_inner);
                        buffer.push_str(&text);
                        truncate_front(&mut buffer, MAX_DIAGNOSTICS_SIZE);
                    }
                }
            }
        });

        Self {
            buffer,
            task: Some(task),
        }
    }

    fn snapshot(&self) -> String {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Wait (bounded) for stderr to close, then return everything captured.
    async fn finish(&mut self) -> String {
        if let Some(task) = self.task.take() {
            if timeout(DIAGNOSTICS_FLUSH, task).await.is_err() {
                debug!("stderr still open after server exit");
            }
        }
        self.snapshot()
    }
}

fn truncate_front(buffer: &mut String, max: usize) {
    if buffer.len() <= max {
        return;
    }
    let mut cut = buffer.len() - max;
    while !buffer.is_char_boundary(cut) {
        cut += 1;
    }
    buffer.drain(..cut);
}

/// Owns the server process and restarts it when needed.
///
/// At most one process is live per supervisor. Children are spawned with
/// `kill_on_drop`, so dropping the supervisor terminates the server.
pub struct ProcessSupervisor {
    config: ServerConfig,
    handle: Handle,
    spawns: u64,
}

impl ProcessSupervisor {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            handle: Handle::NotStarted,
            spawns: 0,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> ProcessState {
        match self.handle {
            Handle::NotStarted => ProcessState::NotStarted,
            Handle::Running(_) => ProcessState::Running,
            Handle::Exited => ProcessState::Exited,
        }
    }

    /// Number of processes spawned over the supervisor's lifetime.
    pub fn spawn_count(&self) -> u64 {
        self.spawns
    }

    /// Probe the process; a terminated process moves the handle to `Exited`.
    pub fn is_alive(&mut self) -> bool {
        let Handle::Running(handle) = &mut self.handle else {
            return false;
        };
        match handle.child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                warn!(%status, "server process exited");
                self.handle = Handle::Exited;
                false
            }
            Err(e) => {
                warn!(error = %e, "failed to probe server process");
                self.handle = Handle::Exited;
                false
            }
        }
    }

    /// Make sure a live, idle process is available, spawning one if not.
    pub async fn ensure_running(&mut self) -> Result<()> {
        let abandoned = matches!(&self.handle, Handle::Running(handle) if handle.in_flight);
        if abandoned {
            warn!("previous request was abandoned mid-flight, restarting server");
            self.stop().await;
        }
        if self.is_alive() {
            return Ok(());
        }
        self.start().await
    }

    /// Replace the current process with a freshly spawned one.
    ///
    /// Retries a failed start `startup_retries` times with exponential backoff.
    pub async fn start(&mut self) -> Result<()> {
        self.stop().await;

        let mut backoff = self.config.startup_backoff;
        let mut attempt = 0;
        loop {
            match self.spawn().await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.config.startup_retries => {
                    attempt += 1;
                    warn!(error = %e, attempt, "server failed to start, retrying");
                    sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Kill and reap the process if one is running.
    pub async fn stop(&mut self) {
        self.discard().await;
    }

    /// Stop the process and return the stderr it produced.
    pub(crate) async fn discard(&mut self) -> String {
        match std::mem::replace(&mut self.handle, Handle::NotStarted) {
            Handle::Running(mut handle) => {
                self.handle = Handle::Exited;
                if let Err(e) = handle.child.kill().await {
                    debug!(error = %e, "failed to kill server process");
                }
                handle.stderr.finish().await
            }
            other => {
                self.handle = other;
                String::new()
            }
        }
    }

    /// Stderr captured from the current process so far.
    pub fn diagnostics(&self) -> String {
        match &self.handle {
            Handle::Running(handle) => handle.stderr.snapshot(),
            _ => String::new(),
        }
    }

    /// Pipes of the running process, marking a request as in flight.
    pub(crate) fn begin_request(
        &mut self,
    ) -> Option<(&mut ChildStdin, &mut BufReader<ChildStdout>)> {
        match &mut self.handle {
            Handle::Running(handle) => {
                handle.in_flight = true;
                Some((&mut handle.stdin, &mut handle.stdout))
            }
            _ => None,
        }
    }

    /// The response line for the in-flight request has been consumed.
    pub(crate) fn finish_request(&mut self) {
        if let Handle::Running(handle) = &mut self.handle {
            handle.in_flight = false;
        }
    }

    async fn spawn(&mut self) -> Result<()> {
        self.config.dirs.ensure().map_err(startup_io)?;

        let mut cmd = Command::new(&self.config.command);
        cmd.args(&self.config.args)
            .env("RUST_LOG", &self.config.log_filter)
            .env("RUST_BACKTRACE", "1")
            .envs(self.config.dirs.env())
            .envs(&self.config.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(startup_io)?;
        self.spawns += 1;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| startup_io(std::io::Error::other("failed to capture stdin")))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| startup_io(std::io::Error::other("failed to capture stdout")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| startup_io(std::io::Error::other("failed to capture stderr")))?;
        let mut stderr = StderrDrain::spawn(stderr);

        info!(
            pid = child.id(),
            command = %self.config.command.display(),
            "spawned server"
        );

        sleep(self.config.startup_grace).await;

        match child.try_wait() {
            Ok(None) => {
                self.handle = Handle::Running(ProcessHandle {
                    child,
                    stdin,
                    stdout: BufReader::new(stdout),
                    stderr,
                    in_flight: false,
                });
                Ok(())
            }
            Ok(Some(status)) => {
                debug!(%status, "server exited during startup");
                self.handle = Handle::Exited;
                Err(Error::Startup {
                    diagnostics: stderr.finish().await,
                    source: None,
                })
            }
            Err(e) => {
                self.handle = Handle::Exited;
                Err(Error::Startup {
                    diagnostics: stderr.snapshot(),
                    source: Some(e),
                })
            }
        }
    }
}

fn startup_io(source: std::io::Error) -> Error {
    Error::Startup {
        diagnostics: String::new(),
        source: Some(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_defaults() {
        let config = ServerConfig::default();
        assert!(config.command.ends_with(DEFAULT_SERVER_SCRIPT));
        assert_eq!(config.log_filter, "web_scrape_mcp=debug,info");
        assert_eq!(config.startup_grace, Duration::from_secs(1));
        assert_eq!(config.startup_retries, 1);
    }

    #[test]
    fn new_supervisor_is_not_started() {
        let mut supervisor = ProcessSupervisor::new(ServerConfig::default());
        assert_eq!(supervisor.state(), ProcessState::NotStarted);
        assert!(!supervisor.is_alive());
        assert_eq!(supervisor.spawn_count(), 0);
        assert!(supervisor.diagnostics().is_empty());
    }

    #[test]
    fn truncate_front_keeps_tail() {
        let mut text = "abcdef".to_string();
        truncate_front(&mut text, 4);
        assert_eq!(text, "cdef");

        let mut text = "aé".to_string();
        truncate_front(&mut text, 1);
        assert_eq!(text, "");
    }
}
