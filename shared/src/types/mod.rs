//! Common type definitions shared across crates

pub mod common;
