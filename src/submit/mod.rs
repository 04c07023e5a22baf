//! Submit client module for posting the form over HTTP

mod client;
mod traits;

pub use client::{SubmissionPayload, SubmitClient, SubmitError, SubmitResponse};
pub use traits::SubmitClientTrait;

#[cfg(test)]
pub use client::ResponseBody;
#[cfg(test)]
pub use traits::MockSubmitClientTrait;
