pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod retry;
pub mod client;

/*

storygen: ask a local Ollama server for a short story, retry on
network trouble, and always hand back some text.

storygen/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and result types
│   ├── main.rs         # CLI shell
│   ├── error.rs        # Error taxonomy
│   ├── config.rs       # Endpoint, model, retry and timeout settings
│   ├── request.rs      # GenerationRequest and prompt template
│   ├── retry.rs        # Fixed-delay retry policy
│   ├── client.rs       # StoryGenerator retry loop
│   └── providers/
│       ├── mod.rs
│       └── ollama.rs   # Ollama generate endpoint
└── tests/

*/

pub use client::StoryGenerator;
pub use config::GeneratorConfig;
pub use error::{Error, ErrorKind};
pub use request::GenerationRequest;

/// Final output of one generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult
{   /// Trimmed text from the model
    Success(String)
  , /// Degraded text naming the prompt and the last error
    Fallback(String)
}

impl GenerationResult
{   pub fn text(&self) -> &str
    {   match self
        {   GenerationResult::Success(text)
          | GenerationResult::Fallback(text) => text
        }
    }

    pub fn into_text(self) -> String
    {   match self
        {   GenerationResult::Success(text)
          | GenerationResult::Fallback(text) => text
        }
    }

    pub fn is_success(&self) -> bool
    {   matches!(self, GenerationResult::Success(_))
    }
}

/// One request/response cycle inside the retry loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationAttempt
{   /// 1-based
    pub attempt_number: usize
  , pub outcome: Result<String, crate::error::Error>
}
