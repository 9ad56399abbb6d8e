//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific authoring area.

pub mod allocation;
pub mod content;
pub mod dialogue;

// Re-export main types
pub use allocation::{AllocationError, AllocatorConfig, IdAllocator};
pub use content::{ContentError, ContentUseCases};
pub use dialogue::{DialogueError, DialogueOps};
