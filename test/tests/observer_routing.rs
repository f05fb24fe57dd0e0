//! Which observers receive an entity's updates

use std::time::{Duration, Instant};

use netsync_client::SyncClient;
use netsync_server::{ServerConfig, SyncServer};
use netsync_shared::{try_read, try_write, EntityId, ObserverId, PayloadFraming};
use netsync_test::{actor_profile, LocalTransport, TestActor};

fn init_logger() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

#[test]
fn owner_is_skipped_when_excluded() {
    init_logger();

    let transport = LocalTransport::new();
    let owner = ObserverId::new(1);
    let watcher = ObserverId::new(2);
    let _owner_receiver = transport.connect(owner);
    let _watcher_receiver = transport.connect(watcher);

    let entity = EntityId::new(3);
    let actor = TestActor::new();
    let mut server = SyncServer::new(ServerConfig {
        exclude_owner: true,
    });
    server
        .spawn_entity(entity, &actor_profile(PayloadFraming::Packed), actor.table.clone())
        .unwrap();
    server.add_observer(&entity, owner).unwrap();
    server.add_observer(&entity, watcher).unwrap();
    server.set_owner(&entity, Some(owner)).unwrap();

    server.send_all_updates(Instant::now(), &transport);

    assert_eq!(transport.pending(&owner), 0);
    assert_eq!(transport.pending(&watcher), 1);
}

#[test]
fn entities_reach_only_their_observers() {
    init_logger();

    let transport = LocalTransport::new();
    let first = ObserverId::new(1);
    let second = ObserverId::new(2);
    let mut first_receiver = transport.connect(first);
    let mut second_receiver = transport.connect(second);

    let profile = actor_profile(PayloadFraming::LengthPrefixed);
    let red = EntityId::new(100);
    let blue = EntityId::new(200);
    let red_actor = TestActor::new();
    let blue_actor = TestActor::new();

    let mut server = SyncServer::new(ServerConfig::default());
    server
        .spawn_entity(red, &profile, red_actor.table.clone())
        .unwrap();
    server
        .spawn_entity(blue, &profile, blue_actor.table.clone())
        .unwrap();
    server.add_observer(&red, first).unwrap();
    server.add_observer(&red, second).unwrap();
    server.add_observer(&blue, second).unwrap();

    try_write(&red_actor.health).unwrap().apply_damage(15);
    try_write(&blue_actor.health).unwrap().apply_damage(35);
    let report = server.send_all_updates(Instant::now(), &transport);
    assert_eq!(report.sent, vec![red, blue]);

    let first_red = TestActor::new();
    let mut first_client = SyncClient::new();
    first_client
        .spawn_entity(red, &profile, first_red.table.clone())
        .unwrap();
    let report = first_client.receive_all(&mut first_receiver).unwrap();
    assert_eq!(report.applied.len(), 1);
    assert_eq!(report.dropped, 0);
    assert_eq!(try_read(&first_red.health).unwrap().current(), 85);

    let second_red = TestActor::new();
    let second_blue = TestActor::new();
    let mut second_client = SyncClient::new();
    second_client
        .spawn_entity(red, &profile, second_red.table.clone())
        .unwrap();
    second_client
        .spawn_entity(blue, &profile, second_blue.table.clone())
        .unwrap();
    let report = second_client.receive_all(&mut second_receiver).unwrap();
    assert_eq!(report.applied.len(), 2);
    assert_eq!(try_read(&second_red.health).unwrap().current(), 85);
    assert_eq!(try_read(&second_blue.health).unwrap().current(), 65);
}

#[test]
fn removed_observer_gets_nothing_more() {
    init_logger();

    let transport = LocalTransport::new();
    let observer = ObserverId::new(9);
    let _receiver = transport.connect(observer);

    let entity = EntityId::new(1);
    let actor = TestActor::new();
    let mut server = SyncServer::new(ServerConfig::default());
    server
        .spawn_entity(entity, &actor_profile(PayloadFraming::Packed), actor.table.clone())
        .unwrap();
    server.add_observer(&entity, observer).unwrap();

    let start = Instant::now();
    server.send_all_updates(start, &transport);
    assert_eq!(transport.pending(&observer), 1);

    server.remove_observer_everywhere(&observer);
    try_write(&actor.health).unwrap().apply_damage(1);
    let report = server.send_all_updates(start + Duration::from_secs(1), &transport);

    // With no observers left the update still counts as sent
    assert_eq!(report.sent, vec![entity]);
    assert_eq!(transport.pending(&observer), 1);
}

#[test]
fn unknown_entity_packets_are_dropped() {
    init_logger();

    let transport = LocalTransport::new();
    let observer = ObserverId::new(4);
    let mut receiver = transport.connect(observer);

    let entity = EntityId::new(50);
    let actor = TestActor::new();
    let mut server = SyncServer::new(ServerConfig::default());
    server
        .spawn_entity(entity, &actor_profile(PayloadFraming::Packed), actor.table.clone())
        .unwrap();
    server.add_observer(&entity, observer).unwrap();
    server.send_all_updates(Instant::now(), &transport);

    let mut client = SyncClient::new();
    let report = client.receive_all(&mut receiver).unwrap();

    assert!(report.applied.is_empty());
    assert_eq!(report.dropped, 1);
}
