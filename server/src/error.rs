use thiserror::Error;

use netsync_shared::{EntityId, ProfileError};

/// Errors raised by a `SyncServer`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    #[error("{entity} is already spawned on this server")]
    DuplicateEntity { entity: EntityId },

    #[error("{entity} is not spawned on this server")]
    UnknownEntity { entity: EntityId },

    #[error("Failed to spawn entity: {0}")]
    Profile(#[from] ProfileError),
}
