//! Trait abstraction for the submit client to enable mocking in tests

use super::client::{SubmissionPayload, SubmitError, SubmitResponse};
use async_trait::async_trait;

/// Trait for form submission, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitClientTrait: Send + Sync {
    /// Post the payload and decode the response
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmitResponse, SubmitError>;
}
