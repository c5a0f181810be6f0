use crate::config::BookingConfig;
use crate::core::selector::{parse_schedule, select_candidates};
use crate::domain::model::{ApiResponse, Candidate};
use crate::domain::ports::{BookingApi, Sleeper, TokioSleeper};
use crate::utils::error::{BookingError, Result};

#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub attempts: u32,
    pub candidate: Candidate,
    pub response: ApiResponse,
}

/// 重試協調器：依序執行 fetch → select → book，失敗時等待固定延遲後重來
pub struct BookingEngine<A: BookingApi, S: Sleeper = TokioSleeper> {
    api: A,
    sleeper: S,
    config: BookingConfig,
}

impl<A: BookingApi> BookingEngine<A, TokioSleeper> {
    pub fn new(api: A, config: BookingConfig) -> Self {
        Self::with_sleeper(api, config, TokioSleeper)
    }
}

impl<A: BookingApi, S: Sleeper> BookingEngine<A, S> {
    pub fn with_sleeper(api: A, config: BookingConfig, sleeper: S) -> Self {
        Self {
            api,
            sleeper,
            config,
        }
    }

    pub async fn run(&self) -> Result<BookingOutcome> {
        let max_attempts = self.config.retry_attempts;

        tracing::info!(
            "Host={} Slot={} Center={} Workouts={}",
            self.config.host,
            self.config.slot,
            self.config.center_id,
            self.config.workout_ids.join(",")
        );
        tracing::info!(
            "Will retry up to {} times, delay {}s",
            max_attempts,
            self.config.retry_delay_seconds
        );

        let mut attempt = 1;
        loop {
            match self.attempt(attempt, max_attempts).await {
                Ok((candidate, response)) => {
                    tracing::info!("✅ Booked. Response: {}", response);
                    return Ok(BookingOutcome {
                        attempts: attempt,
                        candidate,
                        response,
                    });
                }
                Err(e) if !e.is_retryable() => {
                    tracing::error!("❌ Attempt {} failed with a non-retryable error: {}", attempt, e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!("Attempt {} failed: {}", attempt, e);
                    if attempt >= max_attempts {
                        tracing::error!("❌ All attempts failed.");
                        return Err(e);
                    }
                }
            }

            self.sleeper.sleep(self.config.retry_delay()).await;
            attempt += 1;
        }
    }

    async fn attempt(&self, attempt: u32, max_attempts: u32) -> Result<(Candidate, ApiResponse)> {
        tracing::info!("Attempt {}/{}: fetching classes...", attempt, max_attempts);
        let response = self.api.fetch_schedule().await?;
        let schedule = parse_schedule(&response)?;

        let candidates = select_candidates(
            &schedule,
            &self.config.center_id,
            &self.config.slot,
            &self.config.workout_ids,
        )?;
        tracing::debug!("{} candidate(s) matched filters", candidates.len());

        let chosen = candidates
            .into_iter()
            .next()
            .ok_or_else(|| BookingError::NoAvailabilityError {
                slot: self.config.slot.clone(),
                center_id: self.config.center_id.clone(),
                workout_ids: self.config.workout_ids.clone(),
            })?;

        tracing::info!(
            "Found candidate: activityId={}, workoutId={}, state={}, start={}",
            chosen.activity_id,
            chosen.workout_id,
            chosen.state,
            chosen.start_time.as_deref().unwrap_or("?")
        );

        tracing::info!("Booking activityId={} ...", chosen.activity_id);
        let booked = self.api.book_class(&chosen.activity_id).await?;

        Ok((chosen, booked))
    }
}
