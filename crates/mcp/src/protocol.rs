//! Line-delimited JSON-RPC 2.0 wire format.
//!
//! Each request and each response occupies exactly one `\n`-terminated line.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{Error, Result};

/// Protocol version string sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request.
///
/// Fields serialize in declaration order: `jsonrpc`, `method`, `params`, `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: Map<String, Value>,
    pub id: u64,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Map<String, Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: method.into(),
            params,
            id,
        }
    }
}

/// Serialize a request into a single newline-terminated line.
///
/// Compact serde_json output escapes control characters inside strings, so
/// the only raw newline is the terminator.
pub fn encode(request: &JsonRpcRequest) -> Result<String> {
    let mut line = serde_json::to_string(request).map_err(|e| Error::Protocol {
        line: format!("<unencodable request {}>", request.id),
        diagnostics: e.to_string(),
    })?;
    line.push('\n');
    Ok(line)
}

/// Parse one response line into the call outcome.
///
/// `diagnostics` is attached to the error if the line is malformed.
/// An `error` key wins over `result`; a missing or `null` result becomes `{}`.
pub fn decode(line: &str, diagnostics: impl FnOnce() -> String) -> Result<Value> {
    decode_response(line, None, diagnostics)
}

/// [`decode`], warning when the response carries an id other than `expected`.
///
/// Responses are matched by order, not id, so a mismatch is informational only.
pub(crate) fn decode_response(
    line: &str,
    expected: Option<u64>,
    diagnostics: impl FnOnce() -> String,
) -> Result<Value> {
    let parsed: Value = match serde_json::from_str(line.trim_end_matches(['\r', '\n'])) {
        Ok(value) => value,
        Err(_) => {
            return Err(Error::Protocol {
                line: line.to_string(),
                diagnostics: diagnostics(),
            });
        }
    };

    let Value::Object(mut response) = parsed else {
        return Err(Error::Protocol {
            line: line.to_string(),
            diagnostics: diagnostics(),
        });
    };

    if let Some(expected) = expected {
        match response.get("id") {
            None | Some(Value::Null) => {}
            Some(id) if id.as_u64() == Some(expected) => {}
            Some(id) => warn!(expected, got = %id, "response id mismatch"),
        }
    }

    if let Some(payload) = response.remove("error") {
        return Err(Error::Tool(payload));
    }

    match response.remove("result") {
        None | Some(Value::Null) => Ok(Value::Object(Map::new())),
        Some(result) => Ok(result),
    }
}
