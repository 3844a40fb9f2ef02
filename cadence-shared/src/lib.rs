//! # Cadence Shared Library
//!
//! This crate contains shared types, business logic, and utilities used by
//! the Cadence API server.
//!
//! ## Module Organization
//!
//! - `analytics`: Habit streak and completion-rate calculations
//! - `auth`: Authentication and authorization utilities
//! - `db`: Database pool and migration management
//! - `models`: Database models and data structures
//! - `mutation`: Optimistic mutation state machine
//! - `tree`: Todo tree arena, filtering, and sorting

pub mod analytics;
pub mod auth;
pub mod db;
pub mod models;
pub mod mutation;
pub mod tree;

/// Current version of the Cadence shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
