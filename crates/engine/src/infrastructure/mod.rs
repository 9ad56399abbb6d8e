//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod config;
pub mod export;
pub mod memory;
pub mod ports;
