//! Tool domain: argument extraction, capability filtering, the tool
//! catalog, and the registry that wires exposed tools into the router.

pub mod arguments;
pub mod definitions;
mod error;
mod filter;
mod registry;

pub use error::ToolError;
pub use filter::ToolFilter;
pub use registry::ToolRegistry;
