use std::{
    collections::{btree_map::Entry, BTreeMap},
    sync::Arc,
};

use log::{debug, info, warn};

use netsync_shared::{
    ComponentResolver, DirtyMask, EntityId, EntityProfile, Envelope, PacketReceiver, Role,
    SyncCoordinator,
};

use crate::ClientError;

/// What one `receive_all` pass did
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReceiveReport {
    /// Updates applied, in arrival order
    pub applied: Vec<(EntityId, DirtyMask)>,
    /// Packets that were logged and dropped
    pub dropped: usize,
}

/// The observer host. Every spawned entity has an observer coordinator built
/// from the same profile the server used.
pub struct SyncClient {
    entities: BTreeMap<EntityId, SyncCoordinator>,
}

impl SyncClient {
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
        }
    }

    /// Builds an observer coordinator for the entity from a locked profile
    pub fn spawn_entity(
        &mut self,
        entity_id: EntityId,
        profile: &EntityProfile,
        resolver: Arc<dyn ComponentResolver>,
    ) -> Result<&mut SyncCoordinator, ClientError> {
        let Entry::Vacant(entry) = self.entities.entry(entity_id) else {
            return Err(ClientError::DuplicateEntity { entity: entity_id });
        };

        let coordinator = profile.build_coordinator(Role::Observer, resolver)?;
        info!("SyncClient: spawned {} as {}", entity_id, profile.name());

        Ok(entry.insert(coordinator))
    }

    pub fn despawn_entity(&mut self, entity_id: &EntityId) -> Result<(), ClientError> {
        let mut coordinator = self
            .entities
            .remove(entity_id)
            .ok_or(ClientError::UnknownEntity { entity: *entity_id })?;
        coordinator.teardown();

        info!("SyncClient: despawned {}", entity_id);
        Ok(())
    }

    pub fn has_entity(&self, entity_id: &EntityId) -> bool {
        self.entities.contains_key(entity_id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn coordinator(&self, entity_id: &EntityId) -> Option<&SyncCoordinator> {
        self.entities.get(entity_id)
    }

    pub fn coordinator_mut(&mut self, entity_id: &EntityId) -> Option<&mut SyncCoordinator> {
        self.entities.get_mut(entity_id)
    }

    /// Applies one enveloped update
    pub fn receive(&mut self, packet: &[u8]) -> Result<(EntityId, DirtyMask), ClientError> {
        let (entity_id, message) = Envelope::read(packet)?;

        let coordinator = self
            .entities
            .get_mut(&entity_id)
            .ok_or(ClientError::UnknownEntity { entity: entity_id })?;
        let mask = coordinator.receive(message)?;

        Ok((entity_id, mask))
    }

    /// Drains the receiver. Packets that cannot be applied are logged and
    /// dropped; only a transport failure stops the pass.
    pub fn receive_all(
        &mut self,
        receiver: &mut dyn PacketReceiver,
    ) -> Result<ReceiveReport, ClientError> {
        let mut report = ReceiveReport::default();

        while let Some(packet) = receiver.receive()? {
            match self.receive(&packet) {
                Ok(applied) => report.applied.push(applied),
                Err(err) => {
                    warn!("SyncClient: dropping packet, {}", err);
                    report.dropped += 1;
                }
            }
        }

        if !report.applied.is_empty() || report.dropped > 0 {
            debug!(
                "SyncClient: applied {} updates, dropped {}",
                report.applied.len(),
                report.dropped
            );
        }

        Ok(report)
    }
}

impl Default for SyncClient {
    fn default() -> Self {
        Self::new()
    }
}
