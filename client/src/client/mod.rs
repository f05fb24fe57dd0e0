mod sync_client;
pub use sync_client::{ReceiveReport, SyncClient};
