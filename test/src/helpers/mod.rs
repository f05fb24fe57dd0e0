pub mod assertions;
pub mod packet_exchange;

pub use packet_exchange::tick_and_exchange;
