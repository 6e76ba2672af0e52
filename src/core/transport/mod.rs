//! Transport layer for the MCP server.
//!
//! The server communicates over standard input/output, the transport MCP
//! clients spawn subprocess servers with.

mod error;
mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
