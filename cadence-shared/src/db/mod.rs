/// Database utilities
///
/// Connection pooling and migration management for PostgreSQL.

pub mod migrations;
pub mod pool;

pub use migrations::run_migrations;
pub use pool::{create_pool, health_check, DatabaseConfig};
