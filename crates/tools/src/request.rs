//! The `{method, params}` shape every facade produces.

use serde::Serialize;
use serde_json::{Map, Value};

/// A request ready for [`mcp::Client::call`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolRequest {
    pub method: String,
    pub params: Map<String, Value>,
}

impl ToolRequest {
    pub fn new(method: impl Into<String>, params: Map<String, Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Build params from any value that serializes to a JSON object.
    ///
    /// Fails if serialization fails or the value is not an object.
    pub fn from_serialize(
        method: impl Into<String>,
        params: &impl Serialize,
    ) -> serde_json::Result<Self> {
        match serde_json::to_value(params)? {
            Value::Object(map) => Ok(Self::new(method, map)),
            other => Err(serde::ser::Error::custom(format!(
                "params must be a JSON object, got {other}"
            ))),
        }
    }

    /// Send this request and return the server's result.
    pub async fn send(self, client: &mcp::Client) -> mcp::Result<Value> {
        client.call(&self.method, self.params).await
    }
}

/// A tool-specific action that serializes to its own params object.
pub trait Facade: Serialize + Sized {
    /// Method name the server dispatches on.
    const METHOD: &'static str;

    fn into_request(self) -> serde_json::Result<ToolRequest> {
        ToolRequest::from_serialize(Self::METHOD, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_params_are_rejected() {
        let err = ToolRequest::from_serialize("noop", &42).unwrap_err();
        assert!(err.to_string().contains("params must be a JSON object"));
    }

    #[test]
    fn serialization_failure_is_reported() {
        struct Broken;
        impl Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("unserializable"))
            }
        }

        let err = ToolRequest::from_serialize("noop", &Broken).unwrap_err();
        assert!(err.to_string().contains("unserializable"));
    }

    #[test]
    fn serializes_as_method_and_params() {
        #[derive(Serialize)]
        struct Ping {
            count: u32,
        }
        impl Facade for Ping {
            const METHOD: &'static str = "ping";
        }

        let req = Ping { count: 2 }.into_request().unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"method": "ping", "params": {"count": 2}})
        );
    }
}
