pub mod helpers;
pub mod local_transport;
pub mod test_profile;

pub use helpers::*;
pub use local_transport::{LocalReceiver, LocalTransport};
pub use test_profile::{actor_profile, TestActor};
