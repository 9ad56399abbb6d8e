//! Save workflow errors.

use loreforge_domain::DomainError;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::allocation::AllocationError;

/// Errors that can occur while saving a record.
///
/// An allocation failure always aborts the save before anything is written.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Id allocation failed: {0}")]
    Allocation(#[from] AllocationError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
