//! Memory facade.

use serde::Serialize;

use crate::Facade;

/// Actions of the `memory` tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "params")]
pub enum Memory {
    #[serde(rename = "memorize_thought")]
    Memorize {
        thought_number: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        tags: Option<Vec<String>>,
    },

    #[serde(rename = "connect_thoughts")]
    Connect {
        from_thought: u32,
        to_thought: u32,
        relation: String,
    },

    #[serde(rename = "search_memory")]
    Search { query: String },
}

impl Facade for Memory {
    const METHOD: &'static str = "memory";
}
