//! Retry policy for failed generation attempts

use std::time::Duration;
use log::debug;

/// Fixed-delay retry policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy
{   pub max_attempts: usize
  , pub delay: Duration
}

impl RetryPolicy
{   /// Create a new retry policy
    pub fn new(
      max_attempts: usize
    , delay: Duration
    ) -> Self
    {   RetryPolicy
        {   max_attempts
          , delay
        }
    }

    pub fn from_config(
      config: &crate::config::GeneratorConfig
    ) -> Self
    {   RetryPolicy::new(config.max_retries, config.retry_delay)
    }

    /// Whether the 1-based `attempt` that failed with `err`
    /// should be followed by another one
    pub fn should_retry(
      &self
    , attempt: usize
    , err: &crate::error::Error
    ) -> bool
    {   let retry = err.is_retryable() && attempt < self.max_attempts;
        debug!(
          "Attempt {} ({:?}): retry = {}",
          attempt, err.kind(), retry
        );
        retry
    }
}

impl Default for RetryPolicy
{   fn default() -> Self
    {   RetryPolicy::from_config(
          &crate::config::GeneratorConfig::default()
        )
    }
}
