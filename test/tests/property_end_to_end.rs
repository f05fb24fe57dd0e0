use std::time::{Duration, Instant};

use proptest::prelude::*;

use netsync_client::SyncClient;
use netsync_server::{ServerConfig, SyncServer};
use netsync_shared::{try_read, try_write, EntityId, ObserverId, PayloadFraming};
use netsync_test::{actor_profile, tick_and_exchange, LocalTransport, TestActor};

#[derive(Clone, Debug)]
enum Action {
    Damage(i32),
    Heal(i32),
    SetMax(i32),
    Look(f32),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (1..60i32).prop_map(Action::Damage),
        (1..60i32).prop_map(Action::Heal),
        (1..300i32).prop_map(Action::SetMax),
        (-720.0f32..720.0).prop_map(Action::Look),
    ]
}

fn framing() -> impl Strategy<Value = PayloadFraming> {
    prop_oneof![
        Just(PayloadFraming::Packed),
        Just(PayloadFraming::LengthPrefixed),
    ]
}

proptest! {
    /// After every tick the client's health equals the server's, whatever
    /// happened in between
    #[test]
    fn prop_client_tracks_server(
        ticks in proptest::collection::vec(proptest::collection::vec(action(), 0..4), 1..20),
        framing in framing(),
    ) {
        let transport = LocalTransport::new();
        let observer = ObserverId::new(1);
        let mut receiver = transport.connect(observer);
        let profile = actor_profile(framing);
        let entity = EntityId::new(1);

        let server_actor = TestActor::new();
        let client_actor = TestActor::new();
        let mut server = SyncServer::new(ServerConfig::default());
        server.spawn_entity(entity, &profile, server_actor.table.clone()).unwrap();
        server.add_observer(&entity, observer).unwrap();
        let mut client = SyncClient::new();
        client.spawn_entity(entity, &profile, client_actor.table.clone()).unwrap();

        let start = Instant::now();
        for (step, actions) in ticks.iter().enumerate() {
            for action in actions {
                match action {
                    Action::Damage(amount) => {
                        try_write(&server_actor.health).unwrap().apply_damage(*amount);
                    }
                    Action::Heal(amount) => {
                        try_write(&server_actor.health).unwrap().heal(*amount);
                    }
                    Action::SetMax(max) => {
                        try_write(&server_actor.health).unwrap().set_max_hp(*max);
                    }
                    Action::Look(degrees) => {
                        try_write(&server_actor.look).unwrap().set_degrees(*degrees);
                    }
                }
            }

            let now = start + Duration::from_secs(step as u64);
            let (sent, received) =
                tick_and_exchange(&mut server, &mut client, &transport, &mut receiver, now);
            prop_assert!(sent.failed.is_empty());
            prop_assert_eq!(received.dropped, 0);

            let expected = try_read(&server_actor.health).unwrap();
            let actual = try_read(&client_actor.health).unwrap();
            prop_assert_eq!(actual.current(), expected.current());
            prop_assert_eq!(actual.max(), expected.max());
        }
    }
}
