//! In-memory transport for E2E testing
//! Routes enveloped updates from the server to each observer's queue without network I/O

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;

use netsync_shared::{ObserverId, PacketReceiver, PacketSender, TransportError};

type Queues = HashMap<ObserverId, VecDeque<Vec<u8>>>;

/// Server end of the loopback. Every connected observer owns one queue.
#[derive(Clone, Default)]
pub struct LocalTransport {
    queues: Arc<Mutex<Queues>>,
}

impl LocalTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a queue for the observer and returns its receiving end
    pub fn connect(&self, observer: ObserverId) -> LocalReceiver {
        if let Ok(mut queues) = self.queues.lock() {
            queues.entry(observer).or_default();
        }
        LocalReceiver {
            observer,
            queues: self.queues.clone(),
        }
    }

    /// Drops the observer's queue. Later sends to it fail.
    pub fn disconnect(&self, observer: &ObserverId) {
        if let Ok(mut queues) = self.queues.lock() {
            queues.remove(observer);
        }
    }

    /// Packets waiting for the observer
    pub fn pending(&self, observer: &ObserverId) -> usize {
        self.queues
            .lock()
            .ok()
            .and_then(|queues| queues.get(observer).map(VecDeque::len))
            .unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Queues>, TransportError> {
        self.queues.lock().map_err(|_| TransportError::ChannelClosed)
    }
}

impl PacketSender for LocalTransport {
    fn send(&self, observer: ObserverId, payload: &[u8]) -> Result<(), TransportError> {
        let mut queues = self.lock()?;
        let queue = queues
            .get_mut(&observer)
            .ok_or(TransportError::UnknownObserver { observer })?;
        queue.push_back(payload.to_vec());
        debug!("LocalTransport: queued {} bytes for {}", payload.len(), observer);
        Ok(())
    }
}

/// Client end of the loopback for one observer
#[derive(Clone)]
pub struct LocalReceiver {
    observer: ObserverId,
    queues: Arc<Mutex<Queues>>,
}

impl LocalReceiver {
    pub fn observer(&self) -> ObserverId {
        self.observer
    }
}

impl PacketReceiver for LocalReceiver {
    fn receive(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        let mut queues = self
            .queues
            .lock()
            .map_err(|_| TransportError::ChannelClosed)?;
        let queue = queues
            .get_mut(&self.observer)
            .ok_or(TransportError::ChannelClosed)?;
        Ok(queue.pop_front())
    }
}
