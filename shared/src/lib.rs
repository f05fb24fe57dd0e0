//! # Netsync Shared
//! Dirty-mask state replication shared between netsync-server & netsync-client
//! crates. Each entity carries a `SyncCoordinator` holding its `SyncModule`s;
//! the authority sends only the modules that changed, tagged by a 32-bit mask.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use netsync_serde::{
    BitCounter, BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr, SerdeFloat,
    SerdeInteger, SignedFloat, SignedInteger, SignedVariableInteger, UnsignedFloat,
    UnsignedInteger, UnsignedVariableInteger,
};

mod backends;
mod component;
mod modules;
mod profile;
mod sync;
mod transport;
mod types;

pub use backends::Timer;
pub use component::{
    component_table::{
        resolve_shared, try_read, try_write, ComponentResolver, ComponentTable, Shared,
    },
    dirty_channel::{DirtyChannel, DirtyReceiver, DirtySender},
    error::ComponentError,
    events::Events,
};
pub use modules::{
    angle_distance, normalize_degrees, DefaultModulesPlugin, HealthComponent, HealthEvent,
    HealthSettings, HealthSyncModule, LookAngleComponent, LookAngleSyncModule,
};
pub use profile::{EntityProfile, ModuleFactory, ProfileError, ProfilePlugin};
pub use sync::{
    config::{PayloadFraming, SyncConfig},
    coordinator::{CoordinatorState, SyncCoordinator, TickOutcome},
    dirty_mask::DirtyMask,
    error::{FramingError, RegistryError, SyncError},
    module_registry::ModuleRegistry,
    sync_message::SyncMessage,
    sync_module::{ModuleSummary, RegisterContext, SyncModule},
};
pub use transport::{
    Envelope, PacketReceiver, PacketSender, StateBroadcaster, TransportError,
};
pub use types::{ComponentId, EntityId, ObserverId, Priority, Role, MAX_MODULES};
