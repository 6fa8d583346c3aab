//! Persistence layer: libSQL-backed storage for published profiles.

pub mod libsql_backend;
pub mod migrations;
pub mod traits;

pub use libsql_backend::LibSqlBackend;
pub use traits::{ProfileRecord, ProfileStore, PublicProfile};
