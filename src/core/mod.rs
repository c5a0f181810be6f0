pub mod engine;
pub mod selector;

pub use crate::domain::model::{ApiResponse, Candidate, ScheduleDocument};
pub use crate::domain::ports::{BookingApi, Sleeper, TokioSleeper};
pub use crate::utils::error::Result;
