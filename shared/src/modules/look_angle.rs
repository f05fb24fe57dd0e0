use log::{info, warn};

use netsync_serde::{BitReader, BitWrite, Serde, SerdeErr, SignedFloat};

use crate::{
    component::component_table::{try_read, try_write, Shared},
    ComponentId, Priority, RegisterContext, SyncModule,
};

/// Degrees with one fraction digit, enough for [-180, 180)
type WireAngle = SignedFloat<11, 1>;

/// Wraps any angle into [-180, 180)
pub fn normalize_degrees(degrees: f32) -> f32 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

/// Shortest distance between two angles, in degrees
pub fn angle_distance(a: f32, b: f32) -> f32 {
    normalize_degrees(b - a).abs()
}

/// Where an entity is aiming, in degrees counter-clockwise from +x
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LookAngleComponent {
    degrees: f32,
}

impl LookAngleComponent {
    pub fn new(degrees: f32) -> Self {
        Self { degrees }
    }

    pub fn degrees(&self) -> f32 {
        self.degrees
    }

    pub fn set_degrees(&mut self, degrees: f32) {
        self.degrees = degrees;
    }

    /// Aims along the vector `(x, y)`
    pub fn look_toward(&mut self, x: f32, y: f32) {
        self.degrees = y.atan2(x).to_degrees();
    }
}

/// Replicates `LookAngleComponent`, polled every capture. Moves within the
/// threshold of the last sent angle are not sent.
pub struct LookAngleSyncModule {
    look: Option<Shared<LookAngleComponent>>,
    threshold: f32,
    baseline: Option<f32>,
    snapshot: f32,
    dirty: bool,
}

impl LookAngleSyncModule {
    pub const COMPONENT_ID: ComponentId = 1;
    pub const PRIORITY: Priority = 20;
    pub const DEFAULT_THRESHOLD_DEGREES: f32 = 0.5;

    pub fn new() -> Self {
        Self::with_threshold(Self::DEFAULT_THRESHOLD_DEGREES)
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            look: None,
            threshold: threshold.max(0.0),
            baseline: None,
            snapshot: 0.0,
            dirty: false,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl Default for LookAngleSyncModule {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncModule for LookAngleSyncModule {
    fn name(&self) -> &'static str {
        "LookAngleSyncModule"
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
        self.look = context.resolve::<LookAngleComponent>();

        if self.look.is_some() {
            info!(
                "LookAngleSyncModule: registered with LookAngleComponent on {}",
                context.entity_name()
            );
        } else {
            warn!(
                "LookAngleSyncModule: no LookAngleComponent on {}, look angle will not replicate",
                context.entity_name()
            );
        }
    }

    fn capture_state(&mut self) {
        let Some(look) = &self.look else {
            return;
        };

        let degrees = match try_read(look) {
            Ok(look) => normalize_degrees(look.degrees()),
            Err(err) => {
                warn!("LookAngleSyncModule: capture skipped, {}", err);
                return;
            }
        };

        self.snapshot = degrees;

        let moved = match self.baseline {
            None => true,
            Some(baseline) => angle_distance(baseline, degrees) > self.threshold,
        };
        if moved {
            self.baseline = Some(degrees);
            self.dirty = true;
        }
    }

    fn write(&self, writer: &mut dyn BitWrite) {
        let angle = WireAngle::try_new(self.snapshot).unwrap_or_else(|err| {
            warn!("LookAngleSyncModule: sending 0 for {}, {}", self.snapshot, err);
            WireAngle::new(0.0f32)
        });
        angle.ser(writer);
    }

    fn read(&mut self, reader: &mut BitReader) -> Result<(), SerdeErr> {
        let degrees = WireAngle::de(reader)?.get();

        if let Some(look) = &self.look {
            match try_write(look) {
                Ok(mut look) => look.set_degrees(degrees),
                Err(err) => warn!("LookAngleSyncModule: cannot apply angle, {}", err),
            }
        }

        Ok(())
    }

    fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
