//! Port traits implemented by adapters.

pub mod history_port;
pub mod config_port;
