//! Swagger/OpenAPI -> tool descriptor engine.
//!
//! This crate turns operations of a parsed Swagger 2.0 or OpenAPI 3.x
//! document into declarative tool descriptors for an automated tool-calling
//! agent: `$ref` resolution, cycle-safe schema projection, transitive model
//! discovery, and deterministic tool naming.
//!
//! The crate is purely synchronous, performs no I/O, never logs, and holds
//! no cache; document acquisition lives in `toolgen-accessor`.

pub mod assembler;
pub mod collector;
pub mod document;
pub mod endpoints;
pub mod error;
pub mod lookup;
pub mod naming;
pub mod projector;
pub mod resolver;
