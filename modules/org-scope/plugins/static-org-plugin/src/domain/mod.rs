//! Domain layer for the static org directory plugin.

pub mod client;
pub mod service;

pub use service::Service;
