use thiserror::Error;

use crate::sync::error::SyncError;

/// Errors raised while building or using an `EntityProfile`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// Profile is locked and cannot be modified
    #[error("Profile is already locked and cannot be modified. EntityProfile.lock() has been called and no further changes are allowed")]
    AlreadyLocked,

    /// Coordinators are only built from a locked profile, so every peer sees the same modules
    #[error("Profile {name} must be locked before coordinators are built from it")]
    NotLocked { name: String },

    #[error("Failed to build coordinator from profile: {0}")]
    Sync(#[from] SyncError),
}
