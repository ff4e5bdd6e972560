//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - PostgreSQL-backed user store
//! - `memory` - In-memory user store with the same observable behavior

pub mod memory;
pub mod postgres;

pub use memory::InMemoryUserRepository;
pub use postgres::{connect, PostgresUserRepository};
