//! Client for a tool server spoken to over stdio.
//!
//! The server is a long-running child process. Requests are JSON-RPC 2.0
//! objects written one per line to its stdin; each request is answered by
//! exactly one line on its stdout.
//!
//! # Example
//!
//! ```no_run
//! use mcp::{Client, ServerConfig};
//! use serde_json::{Map, json};
//!
//! # async fn example() -> mcp::Result<()> {
//! let client = Client::new(ServerConfig {
//!     command: "./mcp-server.sh".into(),
//!     ..ServerConfig::default()
//! });
//!
//! let mut params = Map::new();
//! params.insert("query".to_string(), json!("tokio process"));
//! let result = client.call("brave_search", params).await?;
//! println!("{result}");
//!
//! client.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod ids;
mod paths;
mod protocol;
mod supervisor;

pub use client::Client;
pub use error::{Error, ErrorKind, Result};
pub use ids::RequestIdAllocator;
pub use paths::DataDirs;
pub use protocol::{JSONRPC_VERSION, JsonRpcRequest, decode, encode};
pub use supervisor::{
    DEFAULT_SERVER_LOG, DEFAULT_STARTUP_GRACE, DEFAULT_TIMEOUT, MAX_RESPONSE_SIZE, ProcessState,
    ProcessSupervisor, ServerConfig, default_command,
};
