//! Concrete implementations of the port traits.

pub mod http_history_adapter;
pub mod retry;
pub mod file_config_adapter;
