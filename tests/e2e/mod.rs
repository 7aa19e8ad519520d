//! End-to-end tests against a live Redis server
//!
//! Ignored by default. Run with:
//! `REDIS_URL=redis://localhost:6379 cargo test -- --ignored`

pub mod redis_store;
