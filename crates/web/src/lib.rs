//! Feedback console web server library.
//!
//! Exposes config, state, error handling, rendering and routes so the
//! integration tests and the binary entrypoint build the same app.

pub mod config;
pub mod error;
pub mod render;
pub mod router;
pub mod routes;
pub mod state;
