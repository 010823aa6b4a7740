//! Library surface of cloudmon: re-export modules for the binary and tests.

pub mod api;
pub mod app;
pub mod config;
pub mod history;
pub mod logging;
pub mod types;
pub mod ui;
pub mod view;
