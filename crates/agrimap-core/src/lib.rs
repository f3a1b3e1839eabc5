//! AgriMap Core - Domain models, errors, configuration and ports
//!
//! This crate contains the domain types shared by the boundary-capture and
//! notification workflows, plus the port traits the adapters implement.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{AgrimapError, Result};
