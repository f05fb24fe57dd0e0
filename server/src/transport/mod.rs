mod fanout;

pub use fanout::Fanout;
pub use netsync_shared::{PacketSender, TransportError};
