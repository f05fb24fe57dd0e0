use std::time::Instant;

use netsync_client::{ReceiveReport, SyncClient};
use netsync_server::{SyncServer, UpdateReport};

use crate::{LocalReceiver, LocalTransport};

/// Ticks every server entity at `now`, then drains the observer's queue
/// into the client
pub fn tick_and_exchange(
    server: &mut SyncServer,
    client: &mut SyncClient,
    transport: &LocalTransport,
    receiver: &mut LocalReceiver,
    now: Instant,
) -> (UpdateReport, ReceiveReport) {
    let sent = server.send_all_updates(now, transport);
    let received = match client.receive_all(receiver) {
        Ok(report) => report,
        Err(err) => panic!("{} could not drain its queue: {}", receiver.observer(), err),
    };
    (sent, received)
}
