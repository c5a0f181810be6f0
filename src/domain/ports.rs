use crate::domain::model::{ApiResponse, ProviderId};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn fetch_schedule(&self) -> Result<ApiResponse>;
    async fn book_class(&self, activity_id: &ProviderId) -> Result<ApiResponse>;
}

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
