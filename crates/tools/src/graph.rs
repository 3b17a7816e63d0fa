//! Knowledge graph facade.

use serde::Serialize;

use crate::Facade;

/// Actions of the `graph_tool` tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "params", rename_all = "snake_case")]
pub enum Graph {
    CreateRoot {
        name: String,
        description: String,
        content: String,
    },

    CreateNode {
        name: String,
        description: String,
        content: String,
        parent_name: String,
        relation: String,
    },

    #[serde(rename = "get_node")]
    Get { node_name: String },

    #[serde(rename = "search_nodes")]
    Search { query: String },
}

impl Facade for Graph {
    const METHOD: &'static str = "graph_tool";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_node_request() {
        let req = Graph::CreateNode {
            name: "tokio".to_string(),
            description: "async runtime".to_string(),
            content: "notes".to_string(),
            parent_name: "rust".to_string(),
            relation: "uses".to_string(),
        }
        .into_request().unwrap();

        assert_eq!(req.method, "graph_tool");
        assert_eq!(req.params["action"], json!("create_node"));
        assert_eq!(req.params["params"]["parent_name"], json!("rust"));
    }

    #[test]
    fn get_node_request() {
        let req = Graph::Get {
            node_name: "rust".to_string(),
        }
        .into_request().unwrap();

        assert_eq!(
            serde_json::Value::Object(req.params),
            json!({"action": "get_node", "params": {"node_name": "rust"}})
        );
    }
}
