use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Weak,
};

/// A one-bit change notification from a state owner to the module that
/// replicates it. Senders may be cloned; every mark collapses into a single
/// pending flag until the receiver takes it.
pub struct DirtyChannel;

impl DirtyChannel {
    pub fn new_channel() -> (DirtySender, DirtyReceiver) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            DirtySender {
                flag: Arc::downgrade(&flag),
            },
            DirtyReceiver { flag },
        )
    }
}

// DirtySender
#[derive(Clone)]
pub struct DirtySender {
    flag: Weak<AtomicBool>,
}

impl DirtySender {
    /// Returns false when the receiver is gone
    pub fn mark(&self) -> bool {
        match self.flag.upgrade() {
            Some(flag) => {
                flag.store(true, Ordering::Release);
                true
            }
            None => false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.flag.strong_count() > 0
    }
}

// DirtyReceiver
pub struct DirtyReceiver {
    flag: Arc<AtomicBool>,
}

impl DirtyReceiver {
    pub fn is_marked(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Returns whether a mark was pending and clears it
    pub fn take(&self) -> bool {
        self.flag.swap(false, Ordering::AcqRel)
    }
}
