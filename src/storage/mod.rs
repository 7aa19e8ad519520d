//! Storage layer for the realtime metrics service
//!
//! This module provides the backing store client.

/// Redis client module
pub mod redis;
