pub mod api;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod mcp;
pub mod platforms;
pub mod upstream;

pub use error::{GatewayError, Result};
