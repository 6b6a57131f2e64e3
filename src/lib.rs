//! Client-side tooling for the advance-reservation flow scheduler: validate
//! and submit time-windowed bandwidth reservations to the controller, build
//! the matching rate-limiting queue ladders on the switches, and gate
//! scheduling on the controller's topology view having converged.

pub mod api;
pub mod client;
pub mod config;
pub mod convergence;
pub mod domain;
pub mod error;
pub mod logger;
pub mod provision;

pub use config::ControllerConfig;
pub use error::{Error, Result};
