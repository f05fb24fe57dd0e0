pub mod config;
pub mod coordinator;
pub mod dirty_mask;
pub mod error;
pub mod module_registry;
pub mod sync_message;
pub mod sync_module;
