mod envelope;
mod error;

pub use envelope::Envelope;
pub use error::TransportError;

use crate::ObserverId;

/// Ordered, reliable delivery of one coordinator's messages to every
/// observer of its entity
pub trait StateBroadcaster {
    fn broadcast(&mut self, payload: &[u8]) -> Result<(), TransportError>;
}

/// Collects every broadcast, for hosts that route messages themselves
impl StateBroadcaster for Vec<Vec<u8>> {
    fn broadcast(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.push(payload.to_vec());
        Ok(())
    }
}

/// Server side of the network link
pub trait PacketSender: Send + Sync {
    /// Sends a packet to one observer
    fn send(&self, observer: ObserverId, payload: &[u8]) -> Result<(), TransportError>;
}

/// Client side of the network link
pub trait PacketReceiver: Send {
    /// Returns the next packet, or `None` once the link is drained
    fn receive(&mut self) -> Result<Option<Vec<u8>>, TransportError>;
}
