use std::collections::BTreeSet;

use netsync_shared::{ObserverId, SyncCoordinator};

/// Everything the server tracks for one replicated entity
pub struct EntityRecord {
    coordinator: SyncCoordinator,
    observers: BTreeSet<ObserverId>,
    owner: Option<ObserverId>,
}

impl EntityRecord {
    pub(crate) fn new(coordinator: SyncCoordinator) -> Self {
        Self {
            coordinator,
            observers: BTreeSet::new(),
            owner: None,
        }
    }

    pub fn coordinator(&self) -> &SyncCoordinator {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut SyncCoordinator {
        &mut self.coordinator
    }

    pub fn observers(&self) -> impl Iterator<Item = &ObserverId> {
        self.observers.iter()
    }

    pub fn has_observer(&self, observer: &ObserverId) -> bool {
        self.observers.contains(observer)
    }

    pub fn owner(&self) -> Option<ObserverId> {
        self.owner
    }

    pub(crate) fn add_observer(&mut self, observer: ObserverId) -> bool {
        self.observers.insert(observer)
    }

    pub(crate) fn remove_observer(&mut self, observer: &ObserverId) -> bool {
        self.observers.remove(observer)
    }

    pub(crate) fn set_owner(&mut self, owner: Option<ObserverId>) {
        self.owner = owner;
    }

    /// Observers that should receive this entity's updates
    pub fn targets(&self, exclude_owner: bool) -> Vec<ObserverId> {
        self.observers
            .iter()
            .filter(|observer| !(exclude_owner && self.owner == Some(**observer)))
            .copied()
            .collect()
    }

    pub(crate) fn split_mut(
        &mut self,
        exclude_owner: bool,
    ) -> (&mut SyncCoordinator, Vec<ObserverId>) {
        let targets = self.targets(exclude_owner);
        (&mut self.coordinator, targets)
    }
}
