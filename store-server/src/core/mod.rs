//! Core module - configuration, state, server and background tasks

pub mod config;
pub mod server;
pub mod state;
pub mod tasks;

pub use config::{Config, NotifyConfig};
pub use server::Server;
pub use state::ServerState;
pub use tasks::BackgroundTasks;
