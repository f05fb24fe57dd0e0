//! Server to client replication over the in-memory transport

use std::time::{Duration, Instant};

use netsync_client::SyncClient;
use netsync_server::{ServerConfig, SyncServer};
use netsync_shared::{
    try_read, try_write, DirtyMask, EntityId, HealthEvent, ObserverId, PayloadFraming,
    SyncError, TransportError,
};
use netsync_test::{
    actor_profile, assert_health_synced, tick_and_exchange, LocalReceiver, LocalTransport,
    TestActor,
};

const TICK: Duration = Duration::from_millis(50);

fn init_logger() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

struct Session {
    transport: LocalTransport,
    receiver: LocalReceiver,
    server: SyncServer,
    client: SyncClient,
    server_actor: TestActor,
    client_actor: TestActor,
    entity: EntityId,
    observer: ObserverId,
    start: Instant,
}

fn session(framing: PayloadFraming) -> Session {
    let transport = LocalTransport::new();
    let observer = ObserverId::new(1);
    let receiver = transport.connect(observer);
    let profile = actor_profile(framing);
    let entity = EntityId::new(10);

    let server_actor = TestActor::new();
    let client_actor = TestActor::new();

    let mut server = SyncServer::new(ServerConfig::default());
    server
        .spawn_entity(entity, &profile, server_actor.table.clone())
        .unwrap();
    server.add_observer(&entity, observer).unwrap();

    let mut client = SyncClient::new();
    client
        .spawn_entity(entity, &profile, client_actor.table.clone())
        .unwrap();

    let start = Instant::now();

    // The first tick always carries the look angle
    let report = server.send_all_updates(start, &transport);
    assert_eq!(report.sent, vec![entity]);
    let report = client.receive_all(&mut receiver.clone()).unwrap();
    assert_eq!(report.applied, vec![(entity, DirtyMask::from_bits(0b10))]);

    Session {
        transport,
        receiver,
        server,
        client,
        server_actor,
        client_actor,
        entity,
        observer,
        start,
    }
}

#[test]
fn damage_reaches_client() {
    init_logger();

    for framing in [PayloadFraming::Packed, PayloadFraming::LengthPrefixed] {
        let mut session = session(framing);

        try_write(&session.server_actor.health)
            .unwrap()
            .apply_damage(30);
        let report = session
            .server
            .send_all_updates(session.start + TICK, &session.transport);
        assert_eq!(report.sent, vec![session.entity]);

        let report = session.client.receive_all(&mut session.receiver).unwrap();
        assert_eq!(
            report.applied,
            vec![(session.entity, DirtyMask::from_bits(0b01))]
        );

        let health = try_read(&session.client_actor.health).unwrap();
        assert_eq!((health.current(), health.max()), (70, 100));
        assert!(health.is_replicated());
        drop(health);

        let events = try_write(&session.client_actor.events).unwrap().drain();
        // Nothing was received before, so the first update is no hit
        assert_eq!(
            events,
            vec![HealthEvent::Changed {
                current: 70,
                max: 100
            }]
        );
    }
}

#[test]
fn ticks_are_gated_by_sync_rate() {
    init_logger();

    let mut session = session(PayloadFraming::Packed);

    try_write(&session.server_actor.health)
        .unwrap()
        .apply_damage(10);

    let report = session
        .server
        .send_all_updates(session.start + TICK / 2, &session.transport);
    assert_eq!(report.not_due, 1);
    assert!(report.sent.is_empty());
    assert_eq!(session.transport.pending(&session.observer), 0);

    let report = session
        .server
        .send_all_updates(session.start + TICK, &session.transport);
    assert_eq!(report.sent, vec![session.entity]);
    assert_eq!(session.transport.pending(&session.observer), 1);

    let report = session
        .server
        .send_all_updates(session.start + TICK * 2, &session.transport);
    assert_eq!(report.idle, 1);
    assert_eq!(session.transport.pending(&session.observer), 1);
}

#[test]
fn both_modules_share_one_message() {
    init_logger();

    let mut session = session(PayloadFraming::Packed);

    try_write(&session.server_actor.health)
        .unwrap()
        .apply_damage(25);
    try_write(&session.server_actor.look)
        .unwrap()
        .set_degrees(-90.0);

    let (_, report) = tick_and_exchange(
        &mut session.server,
        &mut session.client,
        &session.transport,
        &mut session.receiver,
        session.start + TICK,
    );

    assert_eq!(
        report.applied,
        vec![(session.entity, DirtyMask::from_bits(0b11))]
    );
    assert_health_synced!(session.server_actor.health, session.client_actor.health);
    assert_eq!(
        try_read(&session.client_actor.look).unwrap().degrees(),
        -90.0
    );
}

#[test]
fn kill_fires_died_once() {
    init_logger();

    let mut session = session(PayloadFraming::Packed);

    for (step, damage) in [60, 60, 60].into_iter().enumerate() {
        try_write(&session.server_actor.health)
            .unwrap()
            .apply_damage(damage);
        session.server.send_all_updates(
            session.start + TICK * (step as u32 + 1),
            &session.transport,
        );
    }
    session.client.receive_all(&mut session.receiver).unwrap();

    let events = try_write(&session.client_actor.events).unwrap().drain();
    let deaths = events
        .iter()
        .filter(|event| **event == HealthEvent::Died)
        .count();

    assert_eq!(deaths, 1);
    assert!(!try_read(&session.client_actor.health).unwrap().is_alive());
}

#[test]
fn failed_send_is_reported_not_retried() {
    init_logger();

    let mut session = session(PayloadFraming::Packed);
    session.transport.disconnect(&session.observer);

    try_write(&session.server_actor.health)
        .unwrap()
        .apply_damage(40);
    let report = session
        .server
        .send_all_updates(session.start + TICK, &session.transport);

    assert_eq!(
        report.failed,
        vec![(
            session.entity,
            SyncError::Transport(TransportError::UnknownObserver {
                observer: session.observer
            })
        )]
    );

    session.transport.connect(session.observer);
    let report = session
        .server
        .send_all_updates(session.start + TICK * 2, &session.transport);

    assert_eq!(report.idle, 1);
    assert_eq!(session.transport.pending(&session.observer), 0);
}

#[test]
fn dead_observer_does_not_repeat_updates_to_healthy_ones() {
    init_logger();

    let mut session = session(PayloadFraming::Packed);
    let unreachable = ObserverId::new(2);
    session
        .server
        .add_observer(&session.entity, unreachable)
        .unwrap();

    try_write(&session.server_actor.health)
        .unwrap()
        .apply_damage(10);

    let mut failed = 0;
    for step in 1..=10u32 {
        let report = session
            .server
            .send_all_updates(session.start + TICK * step, &session.transport);
        failed += report.failed.len();
    }

    assert_eq!(failed, 1);
    assert_eq!(session.transport.pending(&session.observer), 1);

    let report = session.client.receive_all(&mut session.receiver).unwrap();
    assert_eq!(
        report.applied,
        vec![(session.entity, DirtyMask::from_bits(0b01))]
    );
    assert_eq!(
        try_read(&session.client_actor.health).unwrap().current(),
        90
    );
}

#[test]
fn despawned_entity_stops_sending() {
    init_logger();

    let mut session = session(PayloadFraming::Packed);
    session.server.despawn_entity(&session.entity).unwrap();

    try_write(&session.server_actor.health)
        .unwrap()
        .apply_damage(5);
    let report = session
        .server
        .send_all_updates(session.start + TICK, &session.transport);

    assert!(report.sent.is_empty());
    assert_eq!(session.transport.pending(&session.observer), 0);
}
