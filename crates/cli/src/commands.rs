//! Command-line surface, one subcommand per tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tools::{
    Facade, Git, Graph, Memory, Priority, Scrape, Search, Status, Task, Thinking, ToolRequest,
};

#[derive(Debug, Parser)]
#[command(name = "mcp-client")]
#[command(about = "Command line interface for MCP tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: ./mcp-client.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Server executable, overriding the config
    #[arg(long, global = true)]
    pub server: Option<PathBuf>,

    /// Response timeout in seconds, overriding the config
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sequential thinking tool
    Think {
        #[command(subcommand)]
        action: ThinkAction,
    },
    /// Memory tool
    Memory {
        #[command(subcommand)]
        action: MemoryAction,
    },
    /// Knowledge graph tool
    Graph {
        #[command(subcommand)]
        action: GraphAction,
    },
    /// Task planning tool
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Brave search tool
    Search {
        /// Search query
        query: String,
    },
    /// URL scraping tool
    Scrape {
        /// URL to scrape
        url: String,
    },
    /// Git tool
    Git {
        /// Repository path on the server side
        #[arg(long, global = true)]
        repo: Option<String>,
        #[command(subcommand)]
        action: GitAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ThinkAction {
    /// Add a new thought
    Add {
        #[arg(long)]
        content: String,
        /// Total number of thoughts
        #[arg(long, default_value_t = 1)]
        total: u32,
    },
    /// Revise an existing thought
    Revise {
        #[arg(long)]
        content: String,
        /// Number of the thought to revise
        #[arg(long)]
        revises: u32,
    },
    /// Branch from an existing thought
    Branch {
        #[arg(long)]
        content: String,
        /// Thought number to branch from
        #[arg(long)]
        branch_from: u32,
        /// Branch identifier
        #[arg(long)]
        branch_id: String,
    },
    /// Show one thought
    Get {
        #[arg(long)]
        number: u32,
    },
    /// Show every thought on a branch
    GetBranch {
        #[arg(long)]
        branch_id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum MemoryAction {
    /// Store a thought in memory
    Memorize {
        /// Thought number to memorize
        #[arg(long)]
        thought: u32,
        /// Tags for the thought
        #[arg(long, num_args = 1..)]
        tags: Option<Vec<String>>,
    },
    /// Connect two memorized thoughts
    Connect {
        #[arg(long)]
        from_thought: u32,
        #[arg(long)]
        to_thought: u32,
        #[arg(long)]
        relation: String,
    },
    /// Search memorized thoughts
    Search {
        #[arg(long)]
        query: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum GraphAction {
    /// Create the root node
    CreateRoot {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        content: String,
    },
    /// Create a node under a parent
    CreateNode {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        content: String,
        /// Parent node name
        #[arg(long)]
        parent: String,
        /// Relation to the parent
        #[arg(long)]
        relation: String,
    },
    /// Fetch a node by name
    Get {
        #[arg(long)]
        name: String,
    },
    /// Search nodes
    Search {
        #[arg(long)]
        query: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaskAction {
    /// Create a task
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        project: String,
        /// low, medium, high or critical
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Update a task's status or priority
    Update {
        #[arg(long)]
        task_id: String,
        /// not-started, in-progress, blocked, completed or cancelled
        #[arg(long)]
        status: Option<Status>,
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Show a task
    Get {
        #[arg(long)]
        task_id: String,
    },
    /// Search tasks
    Search {
        #[arg(long)]
        query: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum GitAction {
    /// Initialize a repository
    Init,
    /// Stage files
    Add {
        #[arg(long, num_args = 1.., required = true)]
        files: Vec<String>,
    },
    /// Commit staged changes
    Commit {
        #[arg(long)]
        message: String,
    },
    /// Show working tree status
    Status,
    /// Show recent commits
    Log {
        #[arg(long)]
        max_count: Option<u32>,
    },
}

impl Commands {
    /// Translate the parsed command into the request sent to the server.
    pub fn into_request(self) -> serde_json::Result<ToolRequest> {
        match self {
            Commands::Think { action } => thinking(action).into_request(),
            Commands::Memory { action } => memory(action).into_request(),
            Commands::Graph { action } => graph(action).into_request(),
            Commands::Task { action } => task(action).into_request(),
            Commands::Search { query } => Search { query }.into_request(),
            Commands::Scrape { url } => Scrape { url }.into_request(),
            Commands::Git { repo, action } => git(action, repo).into_request(),
        }
    }
}

fn thinking(action: ThinkAction) -> Thinking {
    match action {
        ThinkAction::Add { content, total } => Thinking::Add {
            content,
            total_thoughts: total,
        },
        ThinkAction::Revise { content, revises } => Thinking::Revise {
            content,
            revises_number: revises,
        },
        ThinkAction::Branch {
            content,
            branch_from,
            branch_id,
        } => Thinking::Branch {
            content,
            branch_from,
            branch_id,
        },
        ThinkAction::Get { number } => Thinking::Get { number },
        ThinkAction::GetBranch { branch_id } => Thinking::GetBranch { branch_id },
    }
}

fn memory(action: MemoryAction) -> Memory {
    match action {
        MemoryAction::Memorize { thought, tags } => Memory::Memorize {
            thought_number: thought,
            tags,
        },
        MemoryAction::Connect {
            from_thought,
            to_thought,
            relation,
        } => Memory::Connect {
            from_thought,
            to_thought,
            relation,
        },
        MemoryAction::Search { query } => Memory::Search { query },
    }
}

fn graph(action: GraphAction) -> Graph {
    match action {
        GraphAction::CreateRoot {
            name,
            description,
            content,
        } => Graph::CreateRoot {
            name,
            description,
            content,
        },
        GraphAction::CreateNode {
            name,
            description,
            content,
            parent,
            relation,
        } => Graph::CreateNode {
            name,
            description,
            content,
            parent_name: parent,
            relation,
        },
        GraphAction::Get { name } => Graph::Get { node_name: name },
        GraphAction::Search { query } => Graph::Search { query },
    }
}

fn task(action: TaskAction) -> Task {
    match action {
        TaskAction::Create {
            title,
            description,
            project,
            priority,
        } => Task::Create {
            title,
            description,
            project,
            priority,
        },
        TaskAction::Update {
            task_id,
            status,
            priority,
        } => Task::Update {
            task_id,
            status,
            priority,
        },
        TaskAction::Get { task_id } => Task::Get { task_id },
        TaskAction::Search { query } => Task::Search { query },
    }
}

fn git(action: GitAction, repo_path: Option<String>) -> Git {
    match action {
        GitAction::Init => Git::Init { repo_path },
        GitAction::Add { files } => Git::Add { files, repo_path },
        GitAction::Commit { message } => Git::Commit { message, repo_path },
        GitAction::Status => Git::Status { repo_path },
        GitAction::Log { max_count } => Git::Log {
            max_count,
            repo_path,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::{Value, json};

    fn request(args: &[&str]) -> ToolRequest {
        let mut argv = vec!["mcp-client"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command.into_request().unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn think_add() {
        let req = request(&["think", "add", "--content", "hello", "--total", "3"]);
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
    fn think_add_defaults_total_to_one() {
        let req = request(&["think", "add", "--content", "x"]);
        assert_eq!(req.params["params"]["total_thoughts"], json!(1));
    }

    #[test]
    fn think_branch() {
        let req = request(&[
            "think",
            "branch",
            "--content",
            "c",
            "--branch-from",
            "2",
            "--branch-id",
            "B",
        ]);
        assert_eq!(
            Value::Object(req.params),
            json!({
                "action": "branch_thought",
                "params": {"content": "c", "branch_from": 2, "branch_id": "B"}
            })
        );
    }

    #[test]
    fn memory_memorize_with_tags() {
        let req = request(&["memory", "memorize", "--thought", "2", "--tags", "rust", "async"]);
        assert_eq!(req.method, "memory");
        assert_eq!(
            req.params["params"],
            json!({"thought_number": 2, "tags": ["rust", "async"]})
        );
    }

    #[test]
    fn task_update_parses_status() {
        let req = request(&["task", "update", "--task-id", "t-9", "--status", "in-progress"]);
        assert_eq!(
            req.params["params"],
            json!({"task_id": "t-9", "status": "InProgress"})
        );
    }

    #[test]
    fn task_rejects_unknown_priority() {
        let parsed = Cli::try_parse_from([
            "mcp-client",
            "task",
            "create",
            "--title",
            "t",
            "--description",
            "d",
            "--project",
            "p",
            "--priority",
            "urgent",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn git_commit_with_repo() {
        let req = request(&["git", "--repo", "./repo", "commit", "--message", "init"]);
        assert_eq!(
            Value::Object(req.params),
            json!({
                "action": "commit_changes",
                "params": {"message": "init", "repo_path": "./repo"}
            })
        );
    }

    #[test]
    fn search_and_scrape_are_flat() {
        let req = request(&["search", "tokio"]);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"method": "brave_search", "params": {"query": "tokio"}})
        );

        let req = request(&["scrape", "https://example.com"]);
        assert_eq!(Value::Object(req.params), json!({"url": "https://example.com"}));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["mcp-client", "search", "q", "--timeout", "5"]).unwrap();
        assert_eq!(cli.timeout, Some(5));
    }
}
