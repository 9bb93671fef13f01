mod practicum;

use crate::core::error::PollError;
use async_trait::async_trait;
use serde_json::Value;

pub use practicum::PracticumProvider;

/// Source of homework statuses.
#[async_trait]
pub trait HomeworkProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the decoded answer for submissions changed since `from_date`
    /// (unix seconds). The shape of the answer is not checked here.
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value, PollError>;
}
