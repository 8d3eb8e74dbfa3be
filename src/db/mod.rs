//! # Connection Pool Provider
//!
//! A single bounded pool of database connections, configured once at
//! startup and passed explicitly to the components that need it.

mod config;
mod errors;
mod pool;

pub use config::DatabaseConfig;
pub use errors::{DbError, DbResult};
pub use pool::{DbPool, ExecOutcome, SqlValue};
