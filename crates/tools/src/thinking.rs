//! Sequential thinking facade.

use serde::Serialize;

use crate::Facade;

/// Actions of the `sequential_thinking` tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "params")]
pub enum Thinking {
    #[serde(rename = "add_thought")]
    Add { content: String, total_thoughts: u32 },

    #[serde(rename = "revise_thought")]
    Revise { content: String, revises_number: u32 },

    #[serde(rename = "branch_thought")]
    Branch {
        content: String,
        branch_from: u32,
        branch_id: String,
    },

    #[serde(rename = "get_thought")]
    Get { number: u32 },

    #[serde(rename = "get_branch")]
    GetBranch { branch_id: String },
}

impl Facade for Thinking {
    const METHOD: &'static str = "sequential_thinking";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn add_thought_request() {
        let req = Thinking::Add {
            content: "hello".to_string(),
            total_thoughts: 3,
        }
        .into_request().unwrap();

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "method": "sequential_thinking",
                "params": {
                    "action": "add_thought",
                    "params": {"content": "hello", "total_thoughts": 3}
                }
            })
        );
    }

    #[test]
    fn branch_thought_params() {
        let req = Thinking::Branch {
            content: "c".to_string(),
            branch_from: 2,
            branch_id: "B".to_string(),
        }
        .into_request().unwrap();

        assert_eq!(
            serde_json::Value::Object(req.params),
            json!({
                "action": "branch_thought",
                "params": {"content": "c", "branch_from": 2, "branch_id": "B"}
            })
        );
    }

    #[test]
    fn revise_thought_params() {
        let req = Thinking::Revise {
            content: "better".to_string(),
            revises_number: 1,
        }
        .into_request().unwrap();

        assert_eq!(req.params["action"], json!("revise_thought"));
        assert_eq!(
            req.params["params"],
            json!({"content": "better", "revises_number": 1})
        );
    }
}
