use thiserror::Error;

use crate::ObserverId;

/// Errors reported by a transport at the replication boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The underlying link refused the payload
    #[error("Failed to send {bytes} bytes to {observer}")]
    SendFailed { observer: ObserverId, bytes: usize },

    /// The transport has no route to this observer
    #[error("Transport has no connection to {observer}")]
    UnknownObserver { observer: ObserverId },

    /// The other end of the link is gone
    #[error("Transport channel is closed")]
    ChannelClosed,
}
