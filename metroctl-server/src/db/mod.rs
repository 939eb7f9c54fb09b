//! Database layer - connection pool, migrations, and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - List operations batch their lookups - no N+1 queries
//! - Transactions for multi-step operations; section mutations lock the
//!   owning line row so concurrent edits of one chain serialize

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;
