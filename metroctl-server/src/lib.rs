//! metroctl-server: HTTP API for subway line management
//!
//! Exposes stations, lines, and line sections over HTTP, backed by
//! PostgreSQL. Section mutations go through the invariant-checked
//! [`metroctl_core::SectionChain`] inside a single transaction.

pub mod db;
pub mod http;

pub use db::{create_pool, DbError};
pub use http::{run_server, ApiError, ServerConfig};
