use std::time::Duration;

/// How module payloads are laid out after the mask
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PayloadFraming {
    /// Payloads are concatenated with no lengths. Every module's layout must
    /// be fixed and identical on all peers.
    #[default]
    Packed,
    /// Every payload is preceded by its length in bits as a `u16`, so a
    /// peer can detect a module that reads too far and skip bits a module
    /// left unread.
    LengthPrefixed,
}

/// Per-entity replication settings. All peers of an entity must agree on
/// `framing`.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncConfig {
    /// Authority ticks per second
    pub sync_rate_hz: f32,
    pub framing: PayloadFraming,
}

impl SyncConfig {
    pub const DEFAULT_SYNC_RATE_HZ: f32 = 20.0;

    /// Time between two authority ticks. Non-positive rates tick on every call.
    pub fn tick_interval(&self) -> Duration {
        if self.sync_rate_hz.is_finite() && self.sync_rate_hz > 0.0 {
            let nanos = (1_000_000_000.0 / f64::from(self.sync_rate_hz)).round();
            Duration::from_nanos(nanos as u64)
        } else {
            Duration::ZERO
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            sync_rate_hz: Self::DEFAULT_SYNC_RATE_HZ,
            framing: PayloadFraming::default(),
        }
    }
}
