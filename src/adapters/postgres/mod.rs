//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - Registered users and their counters
//! - `connect` - Pool construction from configuration

mod pool;
mod user_repository;

pub use pool::connect;
pub use user_repository::PostgresUserRepository;
