pub mod admin;
pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod export;
pub mod feedback;
pub mod kiosk;
pub mod login;
pub mod models;
pub mod session;
pub mod ui;

pub use error::{AppError, Result};
