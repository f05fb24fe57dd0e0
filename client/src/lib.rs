//! # Netsync Client
//! The observer side of netsync. Owns one observer `SyncCoordinator` per
//! entity the server replicates to this peer and applies every received
//! update to it.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod transport {
    pub use netsync_shared::{PacketReceiver, TransportError};
}
pub mod shared {
    pub use netsync_shared::{
        BitReader, BitWrite, BitWriter, ConstBitLength, EntityId, EntityProfile, Serde,
        SerdeErr, SyncConfig,
    };
}

mod client;
mod error;

pub use client::{ReceiveReport, SyncClient};
pub use error::ClientError;
