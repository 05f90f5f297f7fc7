//! Common utilities for the dropcap engine.
//!
//! This crate provides shared infrastructure used by the other dropcap
//! crates:
//! - **Warning System** - deduplicated, colored terminal output for
//!   data-quality conditions (unsupported style values, fallback metrics)

pub mod warning;
