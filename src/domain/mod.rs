//! Domain layer containing the entrance system's types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `user` - Registered users, entry counters and stay time

pub mod foundation;
pub mod user;
