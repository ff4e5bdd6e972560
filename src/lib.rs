//! Entrance System - user store for an entrance and access-control system
//!
//! Persists registered users (barcode identity, remaining and total entries,
//! accumulated stay time) and exposes one-statement operations to read them
//! and move their counters.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
