use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use log::info;

use super::error::ComponentError;

/// State owned by an entity and referenced by the modules that replicate it
pub type Shared<T> = Arc<RwLock<T>>;

/// Component lookup an entity offers to its sync modules
pub trait ComponentResolver: Send + Sync {
    /// Returns the `Shared<T>` stored for `type_id`, type-erased
    fn resolve_any(&self, type_id: TypeId) -> Option<Arc<dyn Any + Send + Sync>>;
}

/// Typed lookup on top of any `ComponentResolver`
pub fn resolve_shared<T: Send + Sync + 'static>(
    resolver: &dyn ComponentResolver,
) -> Option<Shared<T>> {
    resolver
        .resolve_any(TypeId::of::<T>())
        .and_then(|any| any.downcast::<RwLock<T>>().ok())
}

/// A type-keyed table of an entity's components, filled in once while the
/// entity is configured
#[derive(Default)]
pub struct ComponentTable {
    components: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl ComponentTable {
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    /// Stores `value`, replacing any component of the same type, and returns
    /// the shared handle
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) -> Shared<T> {
        let shared = Arc::new(RwLock::new(value));
        self.insert_shared(shared.clone());
        shared
    }

    pub fn insert_shared<T: Send + Sync + 'static>(&mut self, shared: Shared<T>) {
        info!("ComponentTable: inserting {}", type_name::<T>());
        self.components.insert(TypeId::of::<T>(), shared);
    }

    pub fn remove<T: Send + Sync + 'static>(&mut self) -> Option<Shared<T>> {
        self.components
            .remove(&TypeId::of::<T>())
            .and_then(|any| any.downcast::<RwLock<T>>().ok())
    }

    pub fn resolve<T: Send + Sync + 'static>(&self) -> Option<Shared<T>> {
        resolve_shared::<T>(self)
    }

    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.components.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ComponentResolver for ComponentTable {
    fn resolve_any(&self, type_id: TypeId) -> Option<Arc<dyn Any + Send + Sync>> {
        self.components.get(&type_id).cloned()
    }
}

/// Read access that reports poisoning instead of panicking
pub fn try_read<T>(shared: &Shared<T>) -> Result<RwLockReadGuard<'_, T>, ComponentError> {
    shared.read().map_err(|_| ComponentError::Poisoned {
        component: type_name::<T>(),
    })
}

/// Write access that reports poisoning instead of panicking
pub fn try_write<T>(shared: &Shared<T>) -> Result<RwLockWriteGuard<'_, T>, ComponentError> {
    shared.write().map_err(|_| ComponentError::Poisoned {
        component: type_name::<T>(),
    })
}
