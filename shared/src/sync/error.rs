use thiserror::Error;

use netsync_serde::SerdeErr;

use crate::{transport::TransportError, ComponentId, Role};

/// Configuration errors, rejected when a module is registered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The id does not fit in the 32-bit dirty mask
    #[error("Module {name} has component id {component_id}, ids must be below {max}")]
    ComponentIdOutOfRange {
        name: &'static str,
        component_id: ComponentId,
        max: usize,
    },

    /// Two modules of the same entity claim one bit
    #[error("Module {incoming} cannot use component id {component_id}, already taken by {existing}")]
    DuplicateComponentId {
        component_id: ComponentId,
        existing: &'static str,
        incoming: &'static str,
    },

    /// The dirty mask has no bit left
    #[error("Cannot register module {name}, an entity holds at most {max} modules")]
    CapacityExceeded { name: &'static str, max: usize },
}

/// A received message does not line up with the local registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FramingError {
    /// The mask names modules this peer never registered
    #[error("Received mask {mask:#010X} names unregistered component ids {unknown:#010X}")]
    UnregisteredModules { mask: u32, unknown: u32 },

    /// A module read more bits than its segment declared
    #[error("Module with component id {component_id} read {consumed} bits from a {declared} bit segment")]
    SegmentLengthMismatch {
        component_id: ComponentId,
        declared: u32,
        consumed: u32,
    },

    /// A payload too large for the u16 segment length
    #[error("Module with component id {component_id} wrote {bits} bits, segments hold at most {max}")]
    SegmentTooLong {
        component_id: ComponentId,
        bits: u32,
        max: u32,
    },
}

/// Errors raised by a `SyncCoordinator`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The coordinator is not running
    #[error("Cannot {operation} while the coordinator is {state}")]
    NotActive {
        operation: &'static str,
        state: &'static str,
    },

    /// The operation belongs to the other side of the protocol
    #[error("Cannot {operation} as {actual:?}, requires {expected:?}")]
    WrongRole {
        operation: &'static str,
        expected: Role,
        actual: Role,
    },

    /// `start` may only be called once
    #[error("Coordinator cannot start, it is already {state}")]
    AlreadyStarted { state: &'static str },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Framing(#[from] FramingError),

    #[error("Malformed sync message: {0}")]
    Serde(#[from] SerdeErr),

    #[error("Transport rejected sync message: {0}")]
    Transport(#[from] TransportError),
}
