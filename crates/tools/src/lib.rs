//! Facades for the server's tools.
//!
//! Each facade turns a friendly action into the `{method, params}` pair the
//! server dispatches on. No tool logic lives here.
//!
//! ```no_run
//! use tools::{Facade, Thinking};
//!
//! # async fn example(client: &mcp::Client) -> Result<(), Box<dyn std::error::Error>> {
//! let result = Thinking::Add {
//!     content: "Outline the parser".to_string(),
//!     total_thoughts: 3,
//! }
//! .into_request()?
//! .send(client)
//! .await?;
//! println!("{result}");
//! # Ok(())
//! # }
//! ```

mod git;
mod graph;
mod memory;
mod request;
mod task;
mod thinking;
mod web;

pub use git::Git;
pub use graph::Graph;
pub use memory::Memory;
pub use request::{Facade, ToolRequest};
pub use task::{Priority, Status, Task};
pub use thinking::Thinking;
pub use web::{Scrape, Search};
