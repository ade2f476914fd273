use log::{debug, info, warn, error};

/// Story generator: prompt building plus the bounded retry loop
pub struct StoryGenerator
{   config: crate::config::GeneratorConfig
  , policy: crate::retry::RetryPolicy
  , ollama: crate::providers::ollama::OllamaClient
}

impl StoryGenerator
{   /// Validate the config and build the HTTP client
    pub fn new(
      config: crate::config::GeneratorConfig
    ) -> Result<Self, crate::error::Error>
    {   config.validate()?;
        debug!(
          "Creating StoryGenerator: model={} endpoint={}",
          config.model, config.endpoint
        );
        let ollama
          = crate::providers::ollama::OllamaClient::new(&config)?;
        let policy = crate::retry::RetryPolicy::from_config(&config);
        Ok(StoryGenerator
        {   config
          , policy
          , ollama
        })
    }

    pub fn config(&self) -> &crate::config::GeneratorConfig
    {   &self.config
    }

    /// Generate a story. Never fails: every error path ends
    /// in a `GenerationResult::Fallback`.
    pub async fn generate(
      &self
    , request: &crate::request::GenerationRequest
    ) -> crate::GenerationResult
    {   self.generate_traced(request).await.0
    }

    /// Like `generate`, also returning every attempt made
    pub async fn generate_traced(
      &self
    , request: &crate::request::GenerationRequest
    ) -> (crate::GenerationResult, Vec<crate::GenerationAttempt>)
    {   let full_prompt = request.full_prompt();
        let max_attempts = self.policy.max_attempts;
        let mut attempts = Vec::with_capacity(max_attempts);
        let mut last_error: Option<crate::error::Error> = None;

        for attempt_number in 1..=max_attempts
        {   info!(
              "Attempt {}/{}: Generating story...",
              attempt_number, max_attempts
            );

            match self.ollama.send_prompt(&full_prompt).await
            {   Ok(text) => {
                  debug!(
                    "Attempt {} succeeded with {} bytes",
                    attempt_number, text.len()
                  );
                  attempts.push(crate::GenerationAttempt
                  {   attempt_number
                    , outcome: Ok(text.clone())
                  });
                  return (crate::GenerationResult::Success(text), attempts);
                }
              , Err(err) => {
                  attempts.push(crate::GenerationAttempt
                  {   attempt_number
                    , outcome: Err(err.clone())
                  });
                  let retry
                    = self.policy.should_retry(attempt_number, &err);

                  if err.is_retryable()
                  {   warn!("Attempt {} failed: {}", attempt_number, err);
                  } else
                  {   error!("Attempt {} aborted: {}", attempt_number, err);
                  }
                  last_error = Some(err);

                  if !retry
                  {   break;
                  }
                  info!(
                    "Retrying in {} seconds...",
                    self.policy.delay.as_secs_f64()
                  );
                  tokio::time::sleep(self.policy.delay).await;
                }
            }
        }

        let fallback = fallback_story(&request.raw_prompt, last_error.as_ref());
        warn!("All attempts failed, returning fallback text");
        (crate::GenerationResult::Fallback(fallback), attempts)
    }
}

/// Text returned in place of a story
pub fn fallback_story(
  raw_prompt: &str
, last_error: Option<&crate::error::Error>
) -> String
{   let error = match last_error
    {   Some(err) => err.to_string()
      , None => "no attempt was made".to_string()
    };
    format!(
      "Could not generate story due to technical difficulties. \
       Original prompt was: '{}'. Error: {}",
      raw_prompt, error
    )
}
