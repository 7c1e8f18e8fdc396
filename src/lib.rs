pub mod client;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod presentation;
pub mod validation;

pub use error::{Error, Result};
