//! alas-server — backend for the Restaurant Alas website
//!
//! Public endpoints serve the menu catalog and opening hours; the admin
//! back-office covers catalog CRUD, opening-hours editing, visitor
//! statistics and image upload behind session-cookie authentication.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod services;
pub mod state;
pub mod util;

pub use config::Config;
pub use state::AppState;
