//! planbench - query plans over ordered in-memory indexes
//!
//! Loads two denormalized tables, builds sorted primary and secondary
//! indexes, and compares lazy sequential-scan plans against index-scan plans
//! that must return identical results.

pub mod bench;
pub mod catalog;
pub mod cli;
pub mod dataset;
pub mod executor;
pub mod index;
pub mod observability;
pub mod record;
