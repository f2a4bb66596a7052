//! Shared utilities for edprep crates.
//!
//! This crate provides the Polars value helpers used across the workspace:
//! converting `AnyValue` cells into Rust primitives and back, with nulls and
//! blank strings treated as missing.

pub mod polars;

pub use polars::{any_to_f64, any_to_i64, any_to_string, any_to_text, format_numeric, parse_f64, parse_i64};
