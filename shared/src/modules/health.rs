use log::{debug, info, warn};

use netsync_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::{
    component::{
        component_table::{try_read, try_write, Shared},
        dirty_channel::{DirtyChannel, DirtyReceiver, DirtySender},
        events::Events,
    },
    ComponentId, Priority, RegisterContext, Role, SyncModule,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthSettings {
    pub max_hp: i32,
    pub start_hp: i32,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            max_hp: 100,
            start_hp: 100,
        }
    }
}

/// Hit points of an entity. On the authority this is the canonical value;
/// a replicated copy only changes through `mirror`.
pub struct HealthComponent {
    current: i32,
    max: i32,
    replicated: bool,
    subscribers: Vec<DirtySender>,
}

impl HealthComponent {
    pub fn new(settings: HealthSettings) -> Self {
        Self {
            current: settings.start_hp,
            max: settings.max_hp,
            replicated: false,
            subscribers: Vec::new(),
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn is_replicated(&self) -> bool {
        self.replicated
    }

    /// Marks this copy as mirroring remote state. Local mutations are then
    /// ignored.
    pub fn set_replicated(&mut self, replicated: bool) {
        self.replicated = replicated;
    }

    /// Returns a receiver flagged on every change
    pub fn subscribe(&mut self) -> DirtyReceiver {
        let (sender, receiver) = DirtyChannel::new_channel();
        self.subscribers.push(sender);
        receiver
    }

    pub fn apply_settings(&mut self, settings: HealthSettings) {
        if self.replicated {
            return;
        }
        self.max = settings.max_hp;
        self.current = settings.start_hp;
        self.notify();
    }

    /// Returns whether hp changed. The dead take no damage.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        if self.replicated || !self.is_alive() || amount <= 0 {
            return false;
        }

        let previous = self.current;
        self.current = self.current.saturating_sub(amount).max(0);
        if previous == self.current {
            return false;
        }

        debug!(
            "HealthComponent: took {} damage, hp {} -> {}",
            amount, previous, self.current
        );
        self.notify();
        true
    }

    /// Returns whether hp changed. The dead cannot be healed.
    pub fn heal(&mut self, amount: i32) -> bool {
        if self.replicated || !self.is_alive() || amount <= 0 {
            return false;
        }

        let previous = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        if previous == self.current {
            return false;
        }

        debug!(
            "HealthComponent: healed {}, hp {} -> {}",
            amount, previous, self.current
        );
        self.notify();
        true
    }

    /// Max hp is at least 1. Current hp is clamped to the new max.
    pub fn set_max_hp(&mut self, max_hp: i32) -> bool {
        if self.replicated {
            return false;
        }

        let previous = self.max;
        self.max = max_hp.max(1);
        if self.current > self.max {
            self.current = self.max;
        }
        if previous == self.max {
            return false;
        }

        self.notify();
        true
    }

    pub fn full_heal(&mut self) -> bool {
        if self.replicated || self.current == self.max {
            return false;
        }
        self.current = self.max;
        self.notify();
        true
    }

    /// Overwrites both values with what the authority sent
    pub fn mirror(&mut self, current: i32, max: i32) {
        if self.current == current && self.max == max {
            return;
        }
        self.current = current;
        self.max = max;
        self.notify();
    }

    fn notify(&mut self) {
        self.subscribers.retain(|sender| sender.mark());
    }
}

impl Default for HealthComponent {
    fn default() -> Self {
        Self::new(HealthSettings::default())
    }
}

/// Observer-side effects of a received health update
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthEvent {
    Changed { current: i32, max: i32 },
    Hit { previous: i32, current: i32 },
    Died,
}

/// Replicates `HealthComponent` as `i32 current, i32 max`
pub struct HealthSyncModule {
    health: Option<Shared<HealthComponent>>,
    events: Option<Shared<Events<HealthEvent>>>,
    changes: Option<DirtyReceiver>,
    dirty: bool,
    sent_current: i32,
    sent_max: i32,
    last_received: i32,
}

impl HealthSyncModule {
    pub const COMPONENT_ID: ComponentId = 0;
    pub const PRIORITY: Priority = 10;

    pub fn new() -> Self {
        Self {
            health: None,
            events: None,
            changes: None,
            dirty: false,
            sent_current: 0,
            sent_max: 0,
            last_received: 0,
        }
    }

    fn push_event(&self, event: HealthEvent) {
        let Some(events) = &self.events else {
            return;
        };
        match try_write(events) {
            Ok(mut events) => events.push(event),
            Err(err) => warn!("HealthSyncModule: dropping {:?}, {}", event, err),
        }
    }
}

impl Default for HealthSyncModule {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncModule for HealthSyncModule {
    fn name(&self) -> &'static str {
        "HealthSyncModule"
    }

    fn component_id(&self) -> ComponentId {
        Self::COMPONENT_ID
    }

    fn priority(&self) -> Priority {
        Self::PRIORITY
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn on_register(&mut self, context: &RegisterContext) {
        let Some(health) = context.resolve::<HealthComponent>() else {
            warn!(
                "HealthSyncModule: no HealthComponent on {}, health will not replicate",
                context.entity_name()
            );
            return;
        };

        match try_write(&health) {
            Ok(mut component) => {
                if context.role() == Some(Role::Observer) {
                    component.set_replicated(true);
                }
                self.changes = Some(component.subscribe());
            }
            Err(err) => {
                warn!("HealthSyncModule: cannot subscribe, {}", err);
                return;
            }
        }

        self.health = Some(health);
        self.events = context.resolve::<Events<HealthEvent>>();

        info!(
            "HealthSyncModule: registered with HealthComponent on {}",
            context.entity_name()
        );
    }

    fn capture_state(&mut self) {
        let Some(health) = &self.health else {
            return;
        };

        if self.changes.as_ref().is_some_and(|changes| changes.take()) {
            self.dirty = true;
        }

        match try_read(health) {
            Ok(health) => {
                self.sent_current = health.current();
                self.sent_max = health.max();
            }
            Err(err) => warn!("HealthSyncModule: capture skipped, {}", err),
        }
    }

    fn write(&self, writer: &mut dyn BitWrite) {
        self.sent_current.ser(writer);
        self.sent_max.ser(writer);

        debug!(
            "HealthSyncModule: sent hp {}/{}",
            self.sent_current, self.sent_max
        );
    }

    fn read(&mut self, reader: &mut BitReader) -> Result<(), SerdeErr> {
        let current = i32::de(reader)?;
        let max = i32::de(reader)?;

        debug!("HealthSyncModule: received hp {}/{}", current, max);

        if let Some(health) = &self.health {
            match try_write(health) {
                Ok(mut health) => health.mirror(current, max),
                Err(err) => warn!("HealthSyncModule: cannot mirror hp, {}", err),
            }
        }

        self.push_event(HealthEvent::Changed { current, max });

        let previous = self.last_received;
        if current < previous && previous > 0 {
            self.push_event(HealthEvent::Hit { previous, current });
        }
        if current <= 0 && previous > 0 {
            self.push_event(HealthEvent::Died);
        }

        self.last_received = current;

        Ok(())
    }

    fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
