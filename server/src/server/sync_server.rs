use std::{
    collections::{btree_map::Entry, BTreeMap},
    sync::Arc,
    time::Instant,
};

use log::{debug, info, warn};

use netsync_shared::{
    ComponentResolver, EntityId, EntityProfile, ObserverId, PacketSender, Role, SyncCoordinator,
    SyncError, TickOutcome,
};

use crate::{transport::Fanout, world::entity_record::EntityRecord, ServerConfig, ServerError};

/// What one `send_all_updates` pass did
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Entities whose dirty modules went out
    pub sent: Vec<EntityId>,
    /// Entities that ticked with nothing to send
    pub idle: usize,
    /// Entities whose sync interval had not elapsed
    pub not_due: usize,
    /// Entities whose tick failed. The update is not resent.
    pub failed: Vec<(EntityId, SyncError)>,
}

/// The authority host. Owns one coordinator per spawned entity and sends
/// each entity's updates to the observers that see it.
pub struct SyncServer {
    config: ServerConfig,
    entities: BTreeMap<EntityId, EntityRecord>,
}

impl SyncServer {
    /// Create a new Server
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            entities: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    // Entities

    /// Builds an authority coordinator for the entity from a locked profile
    pub fn spawn_entity(
        &mut self,
        entity_id: EntityId,
        profile: &EntityProfile,
        resolver: Arc<dyn ComponentResolver>,
    ) -> Result<&mut EntityRecord, ServerError> {
        let Entry::Vacant(entry) = self.entities.entry(entity_id) else {
            return Err(ServerError::DuplicateEntity { entity: entity_id });
        };

        let coordinator = profile.build_coordinator(Role::Authority, resolver)?;
        info!("SyncServer: spawned {} as {}", entity_id, profile.name());

        Ok(entry.insert(EntityRecord::new(coordinator)))
    }

    /// Tears down the entity's coordinator. Its observers get nothing more.
    pub fn despawn_entity(&mut self, entity_id: &EntityId) -> Result<(), ServerError> {
        let mut record = self
            .entities
            .remove(entity_id)
            .ok_or(ServerError::UnknownEntity { entity: *entity_id })?;
        record.coordinator_mut().teardown();

        info!("SyncServer: despawned {}", entity_id);
        Ok(())
    }

    pub fn has_entity(&self, entity_id: &EntityId) -> bool {
        self.entities.contains_key(entity_id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entity(&self, entity_id: &EntityId) -> Option<&EntityRecord> {
        self.entities.get(entity_id)
    }

    pub fn entity_mut(&mut self, entity_id: &EntityId) -> Option<&mut EntityRecord> {
        self.entities.get_mut(entity_id)
    }

    pub fn coordinator_mut(&mut self, entity_id: &EntityId) -> Option<&mut SyncCoordinator> {
        self.entities
            .get_mut(entity_id)
            .map(|record| record.coordinator_mut())
    }

    // Observers

    /// Returns whether the observer was newly added
    pub fn add_observer(
        &mut self,
        entity_id: &EntityId,
        observer: ObserverId,
    ) -> Result<bool, ServerError> {
        let added = self.record_mut(entity_id)?.add_observer(observer);
        if added {
            debug!("SyncServer: {} now observes {}", observer, entity_id);
        }
        Ok(added)
    }

    /// Returns whether the observer was present
    pub fn remove_observer(
        &mut self,
        entity_id: &EntityId,
        observer: &ObserverId,
    ) -> Result<bool, ServerError> {
        Ok(self.record_mut(entity_id)?.remove_observer(observer))
    }

    /// Drops the observer from every entity, as when a peer disconnects
    pub fn remove_observer_everywhere(&mut self, observer: &ObserverId) {
        for record in self.entities.values_mut() {
            record.remove_observer(observer);
            if record.owner() == Some(*observer) {
                record.set_owner(None);
            }
        }
    }

    pub fn set_owner(
        &mut self,
        entity_id: &EntityId,
        owner: Option<ObserverId>,
    ) -> Result<(), ServerError> {
        self.record_mut(entity_id)?.set_owner(owner);
        Ok(())
    }

    // Updates

    /// Ticks every entity at `now` and sends what changed
    pub fn send_all_updates(&mut self, now: Instant, sender: &dyn PacketSender) -> UpdateReport {
        let mut report = UpdateReport::default();
        let exclude_owner = self.config.exclude_owner;

        for (entity_id, record) in self.entities.iter_mut() {
            let (coordinator, targets) = record.split_mut(exclude_owner);
            let mut fanout = Fanout::new(*entity_id, targets, sender);

            match coordinator.tick_at(now, &mut fanout) {
                Ok(TickOutcome::Sent(message)) => {
                    debug!(
                        "SyncServer: {} sent mask {} to {} observers",
                        entity_id,
                        message.mask(),
                        fanout.targets().len()
                    );
                    report.sent.push(*entity_id);
                }
                Ok(TickOutcome::Idle) => report.idle += 1,
                Ok(TickOutcome::NotDue) => report.not_due += 1,
                Err(err) => {
                    warn!("SyncServer: {} update failed, {}", entity_id, err);
                    report.failed.push((*entity_id, err));
                }
            }
        }

        report
    }

    fn record_mut(&mut self, entity_id: &EntityId) -> Result<&mut EntityRecord, ServerError> {
        self.entities
            .get_mut(entity_id)
            .ok_or(ServerError::UnknownEntity { entity: *entity_id })
    }
}
