use log::info;

use crate::{ComponentId, DirtyMask, MAX_MODULES};

use super::{
    error::RegistryError,
    sync_module::{ModuleSummary, RegisterContext, SyncModule},
};

/// The modules of one entity, always sorted by ascending priority. Ties keep
/// registration order, so two peers registering the same modules in the same
/// order agree on the wire layout.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<Box<dyn SyncModule>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Checks a module against the registry without attaching it
    pub fn validate(&self, module: &dyn SyncModule) -> Result<(), RegistryError> {
        let component_id = module.component_id();

        if (component_id as usize) >= MAX_MODULES {
            return Err(RegistryError::ComponentIdOutOfRange {
                name: module.name(),
                component_id,
                max: MAX_MODULES,
            });
        }

        if self.modules.len() >= MAX_MODULES {
            return Err(RegistryError::CapacityExceeded {
                name: module.name(),
                max: MAX_MODULES,
            });
        }

        if let Some(existing) = self.get(component_id) {
            return Err(RegistryError::DuplicateComponentId {
                component_id,
                existing: existing.name(),
                incoming: module.name(),
            });
        }

        Ok(())
    }

    /// Validates, runs `on_register`, then inserts in priority order
    pub fn register(
        &mut self,
        mut module: Box<dyn SyncModule>,
        context: &RegisterContext,
    ) -> Result<(), RegistryError> {
        self.validate(module.as_ref())?;

        module.on_register(context);

        info!(
            "ModuleRegistry: registered {} (id: {}, priority: {}) on {}",
            module.name(),
            module.component_id(),
            module.priority(),
            context.entity_name()
        );

        self.modules.push(module);
        // stable, so equal priorities stay in registration order
        self.modules.sort_by_key(|module| module.priority());

        Ok(())
    }

    /// Detaches and returns the module, or `None` if no module has this id
    pub fn unregister(&mut self, component_id: ComponentId) -> Option<Box<dyn SyncModule>> {
        let index = self
            .modules
            .iter()
            .position(|module| module.component_id() == component_id)?;
        let module = self.modules.remove(index);

        info!(
            "ModuleRegistry: unregistered {} (id: {})",
            module.name(),
            component_id
        );

        Some(module)
    }

    pub fn get(&self, component_id: ComponentId) -> Option<&dyn SyncModule> {
        self.iter().find(|module| module.component_id() == component_id)
    }

    pub fn contains(&self, component_id: ComponentId) -> bool {
        self.get(component_id).is_some()
    }

    /// Modules in wire order
    pub fn iter(&self) -> impl Iterator<Item = &dyn SyncModule> {
        self.modules.iter().map(|module| module.as_ref())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn SyncModule>> {
        self.modules.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// One bit for every registered module
    pub fn registered_mask(&self) -> DirtyMask {
        let mut mask = DirtyMask::new();
        for module in self.iter() {
            mask.set_bit(module.component_id(), true);
        }
        mask
    }

    /// One bit for every module that is currently dirty
    pub fn dirty_mask(&self) -> DirtyMask {
        let mut mask = DirtyMask::new();
        for module in self.iter().filter(|module| module.is_dirty()) {
            mask.set_bit(module.component_id(), true);
        }
        mask
    }

    pub fn summaries(&self) -> Vec<ModuleSummary> {
        self.iter()
            .map(|module| ModuleSummary {
                name: module.name(),
                component_id: module.component_id(),
                priority: module.priority(),
                is_dirty: module.is_dirty(),
            })
            .collect()
    }
}
