//! Integration tests against the public API

pub mod config_validation_tests;
pub mod memory_store_tests;
