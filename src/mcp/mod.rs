pub(crate) mod server;
pub(crate) mod types;

pub use server::ToolServer;
pub use types::{ToolCallRequest, ToolCallResult, ToolContent};
