#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "Persistence, authentication, task services, routing and error handling for the"]
#![doc = "TaskBoard backend. The `taskboard` binary wires these together from `Config`; the"]
#![doc = "`create_user` binary reuses the stores to seed accounts."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use crate::config::Config;
pub use crate::error::AppError;
pub use crate::state::AppState;
