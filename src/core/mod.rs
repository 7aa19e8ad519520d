//! Core functionality of the realtime metrics service

pub mod realtime_metrics;
