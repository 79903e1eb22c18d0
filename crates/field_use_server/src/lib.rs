//! Admin HTTP server for the field-use reporter.

pub mod config;
pub mod error;
pub mod handlers;
pub mod menu;
pub mod middleware;
pub mod render;
pub mod router;
pub mod state;
