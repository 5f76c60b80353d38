//! webpath-dap — Debug Adapter Protocol types for the path transformer.
//!
//! Models the subset of DAP requests and responses whose source locations
//! are rewritten between client paths and target URLs: launch/attach
//! configuration, `setBreakpoints` and `stackTrace`.

pub mod error;
pub mod mapping;
pub mod protocol;

// Re-export key types for convenience.
pub use error::DapError;
pub use mapping::{PathMapping, PathMappingEntry};
pub use protocol::*;
