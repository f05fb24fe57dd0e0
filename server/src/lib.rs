//! # Netsync Server
//! The authority side of netsync. Owns one `SyncCoordinator` per entity,
//! ticks them at their sync rate and sends every resulting message to the
//! entity's observers.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod transport;
pub mod shared {
    pub use netsync_shared::{
        BitReader, BitWrite, BitWriter, ConstBitLength, EntityId, EntityProfile, ObserverId,
        Serde, SerdeErr, SyncConfig,
    };
}

mod error;
mod server;
mod world;

pub use error::ServerError;
pub use server::{ServerConfig, SyncServer, UpdateReport};
pub use world::entity_record::EntityRecord;
