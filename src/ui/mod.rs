//! GUI views and application shell.

pub mod admin_view;
pub mod app;
pub mod components;
pub mod kiosk_view;
pub mod login_view;
pub mod super_admin_view;

pub use app::PointageApp;
