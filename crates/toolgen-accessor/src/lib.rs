//! Document accessor: retrieval, caching, and decoding of Swagger/OpenAPI
//! documents.
//!
//! Everything that touches the network, the filesystem, or the environment
//! lives here. `toolgen-core` consumes only the already-parsed, in-memory,
//! dialect-tagged document this crate produces.

pub mod config;
pub mod error;
pub mod loader;
