//! Configuration for the generation endpoint and retry behavior

use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Local Ollama generate endpoint
pub const DEFAULT_ENDPOINT: &str
  = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "tinyllama";
pub const DEFAULT_MAX_RETRIES: usize = 3;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Inference options sent with every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingOptions
{   /// Sampling temperature
    pub temperature: f32
  , /// Context window in tokens
    pub num_ctx: u32
}

impl Default for SamplingOptions
{   fn default() -> Self
    {   SamplingOptions
        {   temperature: 0.7
          , num_ctx: 512
        }
    }
}

/// Generator configuration, built once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig
{   /// Full URL of the generate endpoint
    pub endpoint: String
  , /// Model identifier
    pub model: String
  , /// Total attempts, the first one included
    pub max_retries: usize
  , /// Pause between failed attempts
    pub retry_delay: Duration
  , /// Per-request timeout
    pub timeout: Duration
  , pub options: SamplingOptions
}

impl Default for GeneratorConfig
{   fn default() -> Self
    {   GeneratorConfig
        {   endpoint: DEFAULT_ENDPOINT.to_string()
          , model: DEFAULT_MODEL.to_string()
          , max_retries: DEFAULT_MAX_RETRIES
          , retry_delay: Duration::from_secs(
              DEFAULT_RETRY_DELAY_SECS
            )
          , timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS)
          , options: SamplingOptions::default()
        }
    }
}

impl GeneratorConfig
{   /// Check the configuration before any request is made
    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   if self.endpoint.trim().is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "endpoint is empty".to_string()
            ));
        }
        if !self.endpoint.starts_with("http://")
          && !self.endpoint.starts_with("https://")
        {   return Err(crate::error::Error::InvalidConfiguration(
              format!(
                "endpoint must be an http(s) URL: {}",
                self.endpoint
              )
            ));
        }
        if self.model.trim().is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "model is empty".to_string()
            ));
        }
        if self.max_retries == 0
        {   return Err(crate::error::Error::InvalidConfiguration(
              "max_retries must be at least 1".to_string()
            ));
        }
        if self.timeout.is_zero()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "timeout must be non-zero".to_string()
            ));
        }
        Ok(())
    }
}
