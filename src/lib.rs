pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod services;
pub mod ui;
