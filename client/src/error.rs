use thiserror::Error;

use netsync_shared::{EntityId, ProfileError, SerdeErr, SyncError, TransportError};

/// Errors raised by a `SyncClient`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{entity} is already spawned on this client")]
    DuplicateEntity { entity: EntityId },

    #[error("Received an update for {entity}, which is not spawned on this client")]
    UnknownEntity { entity: EntityId },

    #[error("Packet too short for an envelope: {0}")]
    MalformedEnvelope(#[from] SerdeErr),

    #[error("Failed to spawn entity: {0}")]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("Failed to receive packet: {0}")]
    Transport(#[from] TransportError),
}
