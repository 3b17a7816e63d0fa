//! MCP error types.

use serde_json::Value;
use thiserror::Error;

/// Failure classes surfaced by [`Client::call`](crate::Client::call).
///
/// Every variant carries the payload needed to decide what to do next:
/// retry, restart the server, or give up.
#[derive(Debug, Error)]
pub enum Error {
    /// The server could not be spawned, or exited during its warm-up window.
    #[error("server failed to start: {}", startup_detail(.source, .diagnostics))]
    Startup {
        diagnostics: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The pipe closed, a write failed, or no response arrived in time.
    #[error("transport error: {reason}{}", stderr_suffix(.diagnostics))]
    Transport { reason: String, diagnostics: String },

    /// A response line was not a JSON object.
    #[error("invalid response line {line:?}{}", stderr_suffix(.diagnostics))]
    Protocol { line: String, diagnostics: String },

    /// The server answered with an `error` payload.
    #[error("tool error: {0}")]
    Tool(Value),
}

/// Discriminant of [`Error`], for callers that only need the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Startup,
    Transport,
    Protocol,
    Tool,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Startup { .. } => ErrorKind::Startup,
            Error::Transport { .. } => ErrorKind::Transport,
            Error::Protocol { .. } => ErrorKind::Protocol,
            Error::Tool(_) => ErrorKind::Tool,
        }
    }

    /// Captured server stderr, if this error kind carries any.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            Error::Startup { diagnostics, .. }
            | Error::Transport { diagnostics, .. }
            | Error::Protocol { diagnostics, .. } => Some(diagnostics),
            Error::Tool(_) => None,
        }
    }

    pub(crate) fn transport(reason: impl Into<String>, diagnostics: String) -> Self {
        Error::Transport {
            reason: reason.into(),
            diagnostics,
        }
    }
}

fn startup_detail(source: &Option<std::io::Error>, diagnostics: &str) -> String {
    match source {
        Some(err) => format!("{err}{}", stderr_suffix(diagnostics)),
        None => format!("process exited during startup{}", stderr_suffix(diagnostics)),
    }
}

fn stderr_suffix(diagnostics: &str) -> String {
    let trimmed = diagnostics.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(". stderr: {trimmed}")
    }
}

pub type Result<T> = std::result::Result<T, Error>;
