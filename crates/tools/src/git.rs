//! Git facade.

use serde::Serialize;

use crate::Facade;

/// Actions of the `git` tool. `repo_path` defaults to the server's choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "params")]
pub enum Git {
    #[serde(rename = "init_repo")]
    Init {
        #[serde(skip_serializing_if = "Option::is_none")]
        repo_path: Option<String>,
    },

    #[serde(rename = "add_files")]
    Add {
        files: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        repo_path: Option<String>,
    },

    #[serde(rename = "commit_changes")]
    Commit {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        repo_path: Option<String>,
    },

    #[serde(rename = "get_status")]
    Status {
        #[serde(skip_serializing_if = "Option::is_none")]
        repo_path: Option<String>,
    },

    #[serde(rename = "get_log")]
    Log {
        #[serde(skip_serializing_if = "Option::is_none")]
        max_count: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        repo_path: Option<String>,
    },
}

impl Facade for Git {
    const METHOD: &'static str = "git";
}
