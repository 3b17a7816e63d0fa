//! Per-user data directories handed to the server process.

use std::path::{Path, PathBuf};

/// Base directory below the user's home.
const DEFAULT_BASE: &str = "Developer/.mcp";

/// The base directory and the three subdirectories the server writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDirs {
    pub base: PathBuf,
    pub logs: PathBuf,
    pub knowledge_graph: PathBuf,
    pub thoughts: PathBuf,
}

impl DataDirs {
    /// Lay out the standard subdirectories under `base`.
    pub fn under(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            logs: base.join("logs"),
            knowledge_graph: base.join("knowledge_graph"),
            thoughts: base.join("thoughts"),
            base,
        }
    }

    /// Create every directory that does not exist yet.
    pub fn ensure(&self) -> std::io::Result<()> {
        for dir in [&self.base, &self.logs, &self.knowledge_graph, &self.thoughts] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Environment entries pointing the server at these directories.
    pub fn env(&self) -> [(&'static str, &Path); 3] {
        [
            ("LOG_DIR", self.logs.as_path()),
            ("KNOWLEDGE_GRAPH_DIR", self.knowledge_graph.as_path()),
            ("THOUGHTS_DIR", self.thoughts.as_path()),
        ]
    }
}

impl Default for DataDirs {
    /// `~/Developer/.mcp`, falling back to `./.mcp` without a home directory.
    fn default() -> Self {
        match dirs::home_dir() {
            Some(home) => Self::under(home.join(DEFAULT_BASE)),
            None => Self::under(".mcp"),
        }
    }
}
