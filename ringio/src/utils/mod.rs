//! Utilities for ringio: small, reusable helpers used across the crate.
//!
//! This module intentionally contains tiny, well-tested helpers for debug
//! printing (hex) and bounds-checked wire parsing.

pub mod hex;
pub mod parse;

// Re-export the most common helpers at the `utils` module level so callers can
// use `crate::utils::bytes_to_hex(...)` etc if they prefer.
pub use hex::*;
pub use parse::*;
