pub mod component_table;
pub mod dirty_channel;
pub mod error;
pub mod events;
