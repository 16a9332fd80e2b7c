// Public API for integration tests and potential library usage

pub mod api;
pub mod config;
pub mod error;
pub mod game;
pub mod protocol;
pub mod state;
pub mod store;
pub mod types;
