use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{debug, error, info};

use storygen::config;
use storygen::{GenerationRequest, GeneratorConfig, StoryGenerator};

const FAILURE_MESSAGE: &str
  = "Failed to generate story. Please try again later.";

/// Generate a short story with a local Ollama model
#[derive(Debug, Parser)]
#[command(version)]
struct Args
{   /// Story topic; defaults to the built-in instructions
    prompt: Option<String>
  , /// Approximate length of the story in words
    #[arg(
      default_value_t = storygen::request::DEFAULT_WORD_COUNT,
      value_parser = clap::value_parser!(u32).range(1..)
    )]
    word_count: u32
  , /// Genre; word count and style directives need one
    genre: Option<String>
  , /// Ollama generate endpoint
    #[arg(long, default_value = config::DEFAULT_ENDPOINT)]
    endpoint: String
  , /// Model identifier
    #[arg(long, default_value = config::DEFAULT_MODEL)]
    model: String
  , /// Total number of attempts
    #[arg(long, default_value_t = config::DEFAULT_MAX_RETRIES)]
    max_retries: usize
  , /// Seconds to wait between failed attempts
    #[arg(long, default_value_t = config::DEFAULT_RETRY_DELAY_SECS)]
    retry_delay: u64
  , /// Request timeout in seconds
    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout: u64
}

impl Args
{   fn generator_config(&self) -> GeneratorConfig
    {   GeneratorConfig
        {   endpoint: self.endpoint.clone()
          , model: self.model.clone()
          , max_retries: self.max_retries
          , retry_delay: Duration::from_secs(self.retry_delay)
          , timeout: Duration::from_secs(self.timeout)
          , ..GeneratorConfig::default()
        }
    }

    fn generation_request(&self) -> GenerationRequest
    {   GenerationRequest::new(self.prompt.clone().unwrap_or_default())
          .with_word_count(self.word_count)
          .with_genre(self.genre.clone())
    }
}

async fn run() -> Result<String, storygen::Error>
{   let args = match Args::try_parse()
    {   Ok(args) => args
      , Err(e) if !e.use_stderr() => e.exit()
      , Err(e) => {
          return Err(storygen::Error::InvalidConfiguration(
            format!("invalid arguments: {}", e)
          ));
        }
    };
    debug!("Parsed arguments: {:?}", args);

    let request = args.generation_request();
    info!("Generating story for prompt: '{}'", request.raw_prompt);
    info!(
      "Word count: {}, Genre: {}",
      request.word_count,
      request.genre.as_deref().unwrap_or("None")
    );

    let generator = StoryGenerator::new(args.generator_config())?;
    let result = generator.generate(&request).await;
    Ok(result.into_text())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode
{   env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("info")
    ).init();

    match run().await
    {   Ok(story) => {
          println!("{}", story);
          ExitCode::SUCCESS
        }
      , Err(e) => {
          error!("Error: {}", e);
          println!("{}", FAILURE_MESSAGE);
          ExitCode::from(1)
        }
    }
}
