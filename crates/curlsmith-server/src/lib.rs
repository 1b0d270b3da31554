//! # curlsmith-server
//!
//! HTTP surface for curlsmith. Exposes the session flow as a small JSON
//! API and serves the embedded single-page browser UI.

pub mod routes;
mod server;

pub use routes::{AppState, SessionView};
pub use server::ConverterServer;
