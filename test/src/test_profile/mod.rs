//! Actor profile and components shared by the E2E tests

use std::sync::Arc;

use netsync_shared::{
    ComponentTable, EntityProfile, Events, HealthComponent, HealthEvent, LookAngleComponent,
    PayloadFraming, Shared,
};

/// Health then look angle, locked
pub fn actor_profile(framing: PayloadFraming) -> EntityProfile {
    let mut profile = EntityProfile::builder("actor");
    profile.add_default_modules().framing(framing).lock();
    profile
}

/// The components an actor carries on one peer
pub struct TestActor {
    pub table: Arc<ComponentTable>,
    pub health: Shared<HealthComponent>,
    pub look: Shared<LookAngleComponent>,
    pub events: Shared<Events<HealthEvent>>,
}

impl TestActor {
    pub fn new() -> Self {
        let mut table = ComponentTable::new();
        let health = table.insert(HealthComponent::default());
        let look = table.insert(LookAngleComponent::default());
        let events = table.insert(Events::<HealthEvent>::new());
        Self {
            table: Arc::new(table),
            health,
            look,
            events,
        }
    }
}

impl Default for TestActor {
    fn default() -> Self {
        Self::new()
    }
}
