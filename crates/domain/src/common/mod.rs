//! Common utility functions shared across the domain.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **No hidden state** - every input is passed explicitly

pub mod gap_fill;
pub mod string;

// Re-export commonly used functions at crate root for convenience
pub use gap_fill::next_gap_id;
pub use string::{none_if_empty, unique_name};
