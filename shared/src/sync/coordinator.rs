use std::{sync::Arc, time::Instant};

use log::{debug, info, warn};

use crate::{
    backends::Timer,
    component::component_table::{resolve_shared, ComponentResolver, Shared},
    transport::StateBroadcaster,
    ComponentId, DirtyMask, Role,
};

use super::{
    config::SyncConfig,
    error::SyncError,
    module_registry::ModuleRegistry,
    sync_message::SyncMessage,
    sync_module::{ModuleSummary, RegisterContext, SyncModule},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinatorState {
    /// Created, modules may be registered, nothing is sent or received
    Inactive,
    Active(Role),
    /// Network presence lost, every tick and receive is rejected
    TornDown,
}

impl CoordinatorState {
    pub fn role(&self) -> Option<Role> {
        match self {
            CoordinatorState::Active(role) => Some(*role),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            CoordinatorState::Inactive => "inactive",
            CoordinatorState::Active(Role::Authority) => "active as authority",
            CoordinatorState::Active(Role::Observer) => "active as observer",
            CoordinatorState::TornDown => "torn down",
        }
    }
}

/// What one authority tick did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The sync interval has not elapsed yet
    NotDue,
    /// Every module was clean, nothing was sent
    Idle,
    /// The message handed to the transport
    Sent(SyncMessage),
}

/// Drives replication of one entity. The authority captures and broadcasts,
/// observers parse and dispatch. Both sides must hold the same modules in the
/// same order.
pub struct SyncCoordinator {
    name: String,
    config: SyncConfig,
    state: CoordinatorState,
    registry: ModuleRegistry,
    resolver: Arc<dyn ComponentResolver>,
    timer: Timer,
}

impl SyncCoordinator {
    pub fn new(
        name: impl Into<String>,
        config: SyncConfig,
        resolver: Arc<dyn ComponentResolver>,
    ) -> Self {
        let timer = Timer::new(config.tick_interval());
        Self {
            name: name.into(),
            config,
            state: CoordinatorState::Inactive,
            registry: ModuleRegistry::new(),
            resolver,
            timer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn role(&self) -> Option<Role> {
        self.state.role()
    }

    // Lifecycle

    /// Takes network presence in `role`. Allowed only once, from `Inactive`.
    pub fn start(&mut self, role: Role) -> Result<(), SyncError> {
        if self.state != CoordinatorState::Inactive {
            return Err(SyncError::AlreadyStarted {
                state: self.state.label(),
            });
        }

        info!("SyncCoordinator: {} started as {:?}", self.name, role);
        self.state = CoordinatorState::Active(role);
        self.timer.expire();

        Ok(())
    }

    /// Stops all further ticks and receives. Calling it again does nothing.
    pub fn teardown(&mut self) {
        if self.state != CoordinatorState::TornDown {
            info!("SyncCoordinator: {} torn down", self.name);
            self.state = CoordinatorState::TornDown;
        }
    }

    // Modules

    /// Attaches a module. It runs `on_register` before it joins the wire order.
    pub fn register_module(&mut self, module: Box<dyn SyncModule>) -> Result<(), SyncError> {
        if self.state == CoordinatorState::TornDown {
            return Err(SyncError::NotActive {
                operation: "register a module",
                state: self.state.label(),
            });
        }

        let context = RegisterContext::new(self.resolver.as_ref(), self.role(), &self.name);
        self.registry.register(module, &context)?;

        Ok(())
    }

    /// Detaches and returns the module with this id, if any
    pub fn unregister_module(&mut self, component_id: ComponentId) -> Option<Box<dyn SyncModule>> {
        self.registry.unregister(component_id)
    }

    /// Finds a sibling component of this entity
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Option<Shared<T>> {
        resolve_shared::<T>(self.resolver.as_ref())
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn module(&self, component_id: ComponentId) -> Option<&dyn SyncModule> {
        self.registry.get(component_id)
    }

    pub fn module_summaries(&self) -> Vec<ModuleSummary> {
        self.registry.summaries()
    }

    // Authority

    /// Runs `synchronize` if the sync interval has elapsed
    pub fn tick(
        &mut self,
        broadcaster: &mut dyn StateBroadcaster,
    ) -> Result<TickOutcome, SyncError> {
        self.tick_at(Instant::now(), broadcaster)
    }

    pub fn tick_at(
        &mut self,
        now: Instant,
        broadcaster: &mut dyn StateBroadcaster,
    ) -> Result<TickOutcome, SyncError> {
        self.require_role("tick", Role::Authority)?;

        if !self.timer.ringing_at(now) {
            return Ok(TickOutcome::NotDue);
        }
        self.timer.reset_at(now);

        self.synchronize(broadcaster)
    }

    /// Captures every module and broadcasts the dirty ones, ignoring the
    /// sync interval. Dirty flags are cleared once the message is handed to
    /// the transport, whether or not the send succeeds; there is no retry.
    pub fn synchronize(
        &mut self,
        broadcaster: &mut dyn StateBroadcaster,
    ) -> Result<TickOutcome, SyncError> {
        self.require_role("synchronize", Role::Authority)?;

        for module in self.registry.iter_mut() {
            module.capture_state();
        }

        let mask = self.registry.dirty_mask();
        if mask.is_clear() {
            return Ok(TickOutcome::Idle);
        }

        let message = SyncMessage::write(&self.registry, mask, self.config.framing)?;
        let sent = broadcaster.broadcast(message.bytes());

        for module in self.registry.iter_mut() {
            module.clear_dirty();
        }

        if let Err(err) = sent {
            warn!("SyncCoordinator: {} dropped mask {}, {}", self.name, mask, err);
            return Err(err.into());
        }

        debug!(
            "SyncCoordinator: {} sent mask {} ({} bytes)",
            self.name,
            mask,
            message.len()
        );

        Ok(TickOutcome::Sent(message))
    }

    // Observer

    /// Applies one message from the authority and returns its mask
    pub fn receive(&mut self, bytes: &[u8]) -> Result<DirtyMask, SyncError> {
        self.require_role("receive", Role::Observer)?;

        let mask = SyncMessage::read(&mut self.registry, bytes, self.config.framing)?;

        debug!("SyncCoordinator: {} applied mask {}", self.name, mask);

        Ok(mask)
    }

    fn require_role(&self, operation: &'static str, expected: Role) -> Result<(), SyncError> {
        match self.state {
            CoordinatorState::Active(actual) if actual == expected => Ok(()),
            CoordinatorState::Active(actual) => Err(SyncError::WrongRole {
                operation,
                expected,
                actual,
            }),
            other => Err(SyncError::NotActive {
                operation,
                state: other.label(),
            }),
        }
    }
}
