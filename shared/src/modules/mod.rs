mod default_modules;
mod health;
mod look_angle;

pub use default_modules::DefaultModulesPlugin;
pub use health::{HealthComponent, HealthEvent, HealthSettings, HealthSyncModule};
pub use look_angle::{angle_distance, normalize_degrees, LookAngleComponent, LookAngleSyncModule};
