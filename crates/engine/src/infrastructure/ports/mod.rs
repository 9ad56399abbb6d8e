//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Record storage (in-memory today, any document store tomorrow)
//! - Counters used for permanent id allocation

mod error;
mod repos;
mod snapshots;

pub use error::RepoError;
pub use repos::*;
pub use snapshots::Snapshots;
