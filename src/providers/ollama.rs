use serde::{Deserialize, Serialize};
use log::{debug, trace, error};

// ===== Wire Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaGenerateRequest
{   pub model: String
  , pub prompt: String
  , pub stream: bool
  , pub options: crate::config::SamplingOptions
}

// ===== Ollama Client =====

/// Single-shot client for the Ollama generate endpoint
pub struct OllamaClient
{   endpoint: String
  , model: String
  , options: crate::config::SamplingOptions
  , http_client: reqwest::Client
}

impl OllamaClient
{   pub fn new(
      config: &crate::config::GeneratorConfig
    ) -> Result<Self, crate::error::Error>
    {   debug!("Creating OllamaClient for {}", config.endpoint);
        let http_client = reqwest::Client::builder()
          .timeout(config.timeout)
          .build()
          .map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            crate::error::Error::InvalidConfiguration(e.to_string())
          })?;

        Ok(OllamaClient
        {   endpoint: config.endpoint.clone()
          , model: config.model.clone()
          , options: config.options.clone()
          , http_client
        })
    }

    /// One request/response cycle, no retries
    pub async fn send_prompt(
      &self
    , prompt: &str
    ) -> Result<String, crate::error::Error>
    {   let request = OllamaGenerateRequest
        {   model: self.model.clone()
          , prompt: prompt.to_string()
          , stream: false
          , options: self.options.clone()
        };

        trace!("Ollama request: {:?}", request);

        let response = self.http_client
          .post(&self.endpoint)
          .json(&request)
          .send()
          .await
          .map_err(|e| crate::error::Error::from_transport(&e))?;

        let status = response.status();
        trace!("Ollama response status: {}", status);

        let response = response
          .error_for_status()
          .map_err(|e| crate::error::Error::from_transport(&e))?;

        let body = response.bytes().await
          .map_err(|e| crate::error::Error::Network(e.to_string()))?;

        parse_generate_body(&body)
    }
}

/// Classify a 2xx body: trimmed text, or the failure class
pub fn parse_generate_body(
  body: &[u8]
) -> Result<String, crate::error::Error>
{   let value: serde_json::Value = serde_json::from_slice(body)
      .map_err(|e| crate::error::Error::Decode(e.to_string()))?;

    trace!("Ollama response body: {}", value);

    match value.get("response")
    {   None => Err(crate::error::Error::Protocol(
          "No response from AI model".to_string()
        ))
      , Some(serde_json::Value::String(text)) => {
          Ok(text.trim().to_string())
        }
      , Some(other) => Err(crate::error::Error::Unknown(
          format!("response field is not a string: {}", other)
        ))
    }
}
