use netsync_serde::{BitReader, BitWrite, SerdeErr};

use crate::{
    component::component_table::{resolve_shared, ComponentResolver, Shared},
    ComponentId, Priority, Role,
};

/// One independently replicated slice of an entity's state.
///
/// On the authority the coordinator calls `capture_state` on every tick,
/// then `write` for each dirty module, then `clear_dirty` on all of them.
/// On observers it calls `read` for every module flagged in a received mask.
/// `write` and `read` must agree on a fixed layout.
pub trait SyncModule: Send {
    /// Used in logs and summaries
    fn name(&self) -> &'static str;

    /// Bit position in the dirty mask, unique per entity and below `MAX_MODULES`
    fn component_id(&self) -> ComponentId;

    /// Lower priorities are written first. Equal priorities keep registration order.
    fn priority(&self) -> Priority;

    fn is_dirty(&self) -> bool;

    /// Called once when attached. Missing siblings are not an error: the
    /// module should log it and stay clean forever.
    fn on_register(&mut self, context: &RegisterContext);

    /// Snapshots the authoritative value. Runs every tick, dirty or not.
    fn capture_state(&mut self);

    /// Writes the last captured snapshot
    fn write(&self, writer: &mut dyn BitWrite);

    /// Consumes exactly what `write` produced and applies it
    fn read(&mut self, reader: &mut BitReader) -> Result<(), SerdeErr>;

    /// Idempotent
    fn clear_dirty(&mut self);
}

/// What a module may see of its coordinator while registering
pub struct RegisterContext<'a> {
    resolver: &'a dyn ComponentResolver,
    role: Option<Role>,
    entity_name: &'a str,
}

impl<'a> RegisterContext<'a> {
    pub fn new(
        resolver: &'a dyn ComponentResolver,
        role: Option<Role>,
        entity_name: &'a str,
    ) -> Self {
        Self {
            resolver,
            role,
            entity_name,
        }
    }

    /// Looks up a sibling component of the owning entity
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Option<Shared<T>> {
        resolve_shared::<T>(self.resolver)
    }

    /// `None` while the coordinator has not started yet
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn entity_name(&self) -> &str {
        self.entity_name
    }
}

/// A snapshot of one registered module, in registry order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleSummary {
    pub name: &'static str,
    pub component_id: ComponentId,
    pub priority: Priority,
    pub is_dirty: bool,
}
