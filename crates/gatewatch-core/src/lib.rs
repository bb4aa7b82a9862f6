//! Gatewatch Core
//!
//! Domain types, traits, and error handling for the Gatewatch build
//! admission gate. This crate has minimal dependencies and defines the
//! vocabulary shared by the engine and the host scheduler integration.

pub mod config;
pub mod error;
pub mod ids;
pub mod ports;
pub mod work;

pub use error::{Error, Result};
pub use ids::WorkItemId;
