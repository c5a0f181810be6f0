pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::CultClient;
pub use config::BookingConfig;
pub use crate::core::engine::{BookingEngine, BookingOutcome};
pub use utils::error::{BookingError, Result};
