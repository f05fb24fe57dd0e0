use crate::profile::{EntityProfile, ProfilePlugin};

use super::{HealthSyncModule, LookAngleSyncModule};

/// Health then look angle, the modules every actor replicates
pub struct DefaultModulesPlugin;

impl ProfilePlugin for DefaultModulesPlugin {
    fn build(&self, profile: &mut EntityProfile) {
        profile
            .add_module::<HealthSyncModule>()
            .add_module::<LookAngleSyncModule>();
    }
}
