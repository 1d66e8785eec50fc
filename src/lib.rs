//! Biblioteca Digital client
//!
//! Keeps a disposable, in-memory copy of a Biblioteca Digital server's books
//! and loans, derives the views a front end needs from it, and sends every
//! change to the server, reloading afterwards instead of patching locally.

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod repository;
pub mod services;
pub mod state;
pub mod views;

pub use commands::Command;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use services::Controller;
