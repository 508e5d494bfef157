//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL-backed adapters using Diesel ORM
//! - **memory**: process-local adapters for development and tests

pub mod memory;
pub mod persistence;
