//! webpath-core — bidirectional client path ↔ target URL resolution for a
//! debug bridge.
//!
//! The [`PathTransformer`] sits on the DAP traffic between a client
//! workspace and a target that identifies scripts by URL. It maps target
//! URLs to client files through explicit `pathMapping` rules or a `webRoot`
//! directory, remembers each confirmed pair, and uses those pairs to turn
//! client breakpoint locations back into URLs.

pub mod cache;
pub mod canonical;
pub mod lifecycle;
pub mod logging;
pub mod path_mapping;
pub mod transformer;
pub mod web_root;

#[cfg(test)]
mod test_support;

// Re-export key types for convenience.
pub use cache::{BiMap, PathCache};
pub use canonical::{canonicalize, is_url, platform_is_case_insensitive, Canonicalizer};
pub use lifecycle::{SessionConfig, SessionConfigurable};
pub use transformer::{
    is_synthetic_script_url, PathTransformer, ResolverState, SharedPathTransformer,
    TransformerPhase, EVAL_URL_PREFIX,
};
pub use webpath_dap::{PathMapping, PathMappingEntry};
