use std::sync::Arc;

use log::info;

use crate::{
    component::component_table::ComponentResolver,
    modules::DefaultModulesPlugin,
    sync::{
        config::{PayloadFraming, SyncConfig},
        coordinator::SyncCoordinator,
        sync_module::SyncModule,
    },
    Role,
};

pub mod error;
pub use error::ProfileError;

// Module Factory
pub trait ModuleFactory: Send + Sync {
    fn build(&self) -> Box<dyn SyncModule>;
}

impl<F> ModuleFactory for F
where
    F: Fn() -> Box<dyn SyncModule> + Send + Sync,
{
    fn build(&self) -> Box<dyn SyncModule> {
        self()
    }
}

// Profile Plugin
pub trait ProfilePlugin {
    fn build(&self, profile: &mut EntityProfile);
}

/// The modules of one kind of entity, in declaration order, plus its sync
/// settings. Authority and observers build their coordinators from the same
/// locked profile so their registries match.
#[derive(Clone)]
pub struct EntityProfile {
    name: String,
    /// Sync rate and payload framing for every coordinator built from this profile
    pub config: SyncConfig,
    factories: Vec<Arc<dyn ModuleFactory>>,
    locked: bool,
}

impl Default for EntityProfile {
    fn default() -> Self {
        Self {
            name: "entity".to_string(),
            config: SyncConfig::default(),
            factories: Vec::new(),
            locked: false,
        }
    }
}

impl EntityProfile {
    pub fn builder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module_count(&self) -> usize {
        self.factories.len()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn add_plugin<P: ProfilePlugin>(&mut self, plugin: P) -> &mut Self {
        self.check_lock();
        plugin.build(self);
        self
    }

    pub fn add_module<M: SyncModule + Default + 'static>(&mut self) -> &mut Self {
        self.check_lock();
        self.push_factory(|| Box::new(M::default()) as Box<dyn SyncModule>);
        self
    }

    pub fn add_module_with<F>(&mut self, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn SyncModule> + Send + Sync + 'static,
    {
        self.check_lock();
        self.push_factory(factory);
        self
    }

    pub fn add_default_modules(&mut self) -> &mut Self {
        self.check_lock();
        let plugin = DefaultModulesPlugin;
        plugin.build(self);
        self
    }

    pub fn sync_rate(&mut self, hz: f32) -> &mut Self {
        self.check_lock();
        self.config.sync_rate_hz = hz;
        self
    }

    pub fn framing(&mut self, framing: PayloadFraming) -> &mut Self {
        self.check_lock();
        self.config.framing = framing;
        self
    }

    // Non-panicking builder methods

    pub fn try_add_plugin<P: ProfilePlugin>(
        &mut self,
        plugin: P,
    ) -> Result<&mut Self, ProfileError> {
        self.try_check_lock()?;
        plugin.build(self);
        Ok(self)
    }

    pub fn try_add_module<M: SyncModule + Default + 'static>(
        &mut self,
    ) -> Result<&mut Self, ProfileError> {
        self.try_check_lock()?;
        self.push_factory(|| Box::new(M::default()) as Box<dyn SyncModule>);
        Ok(self)
    }

    pub fn try_add_module_with<F>(&mut self, factory: F) -> Result<&mut Self, ProfileError>
    where
        F: Fn() -> Box<dyn SyncModule> + Send + Sync + 'static,
    {
        self.try_check_lock()?;
        self.push_factory(factory);
        Ok(self)
    }

    pub fn try_add_default_modules(&mut self) -> Result<&mut Self, ProfileError> {
        self.try_check_lock()?;
        let plugin = DefaultModulesPlugin;
        plugin.build(self);
        Ok(self)
    }

    pub fn try_sync_rate(&mut self, hz: f32) -> Result<&mut Self, ProfileError> {
        self.try_check_lock()?;
        self.config.sync_rate_hz = hz;
        Ok(self)
    }

    pub fn try_framing(&mut self, framing: PayloadFraming) -> Result<&mut Self, ProfileError> {
        self.try_check_lock()?;
        self.config.framing = framing;
        Ok(self)
    }

    pub fn try_lock(&mut self) -> Result<(), ProfileError> {
        self.try_check_lock()?;
        self.locked = true;
        Ok(())
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
    }

    /// Returns Err if the profile is locked
    pub fn try_check_lock(&self) -> Result<(), ProfileError> {
        if self.locked {
            Err(ProfileError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    /// Panics if the profile is locked
    pub fn check_lock(&self) {
        if self.locked {
            panic!("Profile already locked!");
        }
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Starts a coordinator in `role` and registers one fresh module per
    /// factory, in declaration order
    pub fn build_coordinator(
        &self,
        role: Role,
        resolver: Arc<dyn ComponentResolver>,
    ) -> Result<SyncCoordinator, ProfileError> {
        if !self.locked {
            return Err(ProfileError::NotLocked {
                name: self.name.clone(),
            });
        }

        let mut coordinator =
            SyncCoordinator::new(self.name.clone(), self.config.clone(), resolver);
        coordinator.start(role)?;
        for factory in &self.factories {
            coordinator.register_module(factory.build())?;
        }

        info!(
            "EntityProfile: built {:?} coordinator for {} with {} modules",
            role,
            self.name,
            coordinator.modules().len()
        );

        Ok(coordinator)
    }

    fn push_factory<F: ModuleFactory + 'static>(&mut self, factory: F) {
        self.factories.push(Arc::new(factory));
    }
}
