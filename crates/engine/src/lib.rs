//! Loreforge Engine library.
//!
//! ## Structure
//!
//! - `use_cases/` - Id allocation, save workflows, dialogue library editing
//! - `infrastructure/` - Ports, in-memory adapters, export, configuration
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
