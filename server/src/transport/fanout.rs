use log::warn;

use netsync_shared::{
    EntityId, Envelope, ObserverId, PacketSender, StateBroadcaster, TransportError,
};

/// Broadcasts one entity's messages to a fixed set of observers, each
/// wrapped in an `Envelope`
pub struct Fanout<'s> {
    entity_id: EntityId,
    targets: Vec<ObserverId>,
    sender: &'s dyn PacketSender,
}

impl<'s> Fanout<'s> {
    pub fn new(
        entity_id: EntityId,
        targets: Vec<ObserverId>,
        sender: &'s dyn PacketSender,
    ) -> Self {
        Self {
            entity_id,
            targets,
            sender,
        }
    }

    pub fn targets(&self) -> &[ObserverId] {
        &self.targets
    }
}

impl StateBroadcaster for Fanout<'_> {
    /// Tries every observer and reports the first failure
    fn broadcast(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        let packet = Envelope::write(self.entity_id, payload);
        let mut first_error = None;

        for observer in &self.targets {
            if let Err(err) = self.sender.send(*observer, &packet) {
                warn!("Fanout: {} update to {} failed, {}", self.entity_id, observer, err);
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
