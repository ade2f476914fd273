use std::time::{Duration, Instant};

use serde_json::json;
use storygen::{
  ErrorKind, GenerationRequest, GenerationResult, GeneratorConfig,
  StoryGenerator,
};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/api/generate";

/// Config pointed at the mock server, with delays short enough for tests
fn test_config(server: &MockServer, max_retries: usize)
  -> GeneratorConfig
{   GeneratorConfig
    {   endpoint: format!("{}{}", server.uri(), GENERATE_PATH)
      , max_retries
      , retry_delay: Duration::from_millis(50)
      , timeout: Duration::from_secs(5)
      , ..GeneratorConfig::default()
    }
}

fn haunted_mill() -> GenerationRequest
{   GenerationRequest::new("a haunted mill")
}

#[tokio::test]
async fn test_server_error_exhausts_retries()
{   let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path(GENERATE_PATH))
      .respond_with(ResponseTemplate::new(500))
      .expect(3)
      .mount(&server)
      .await;

    let generator = StoryGenerator::new(test_config(&server, 3))
      .expect("valid config");

    let start = Instant::now();
    let (result, attempts) = generator
      .generate_traced(&haunted_mill())
      .await;
    let elapsed = start.elapsed();

    assert_eq!(attempts.len(), 3);
    assert!(attempts.iter().all(|a| {
      matches!(&a.outcome, Err(e) if e.kind() == ErrorKind::Network)
    }));
    assert_eq!(
      attempts.iter().map(|a| a.attempt_number).collect::<Vec<_>>(),
      vec![1, 2, 3]
    );

    // two pauses between three attempts, none after the last
    assert!(
      elapsed >= Duration::from_millis(100),
      "Expected at least 100ms of retry delay, got: {elapsed:?}"
    );

    match result
    {   GenerationResult::Fallback(text) => {
          assert!(text.contains("Original prompt was: 'a haunted mill'"));
          assert!(text.contains("500"));
        }
      , other => panic!("Expected fallback, got {other:?}")
    }
}

#[tokio::test]
async fn test_retry_then_success_trims_text()
{   let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path(GENERATE_PATH))
      .respond_with(ResponseTemplate::new(500))
      .up_to_n_times(2)
      .expect(2)
      .mount(&server)
      .await;

    Mock::given(method("POST"))
      .and(path(GENERATE_PATH))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(json!({ "response": " A tale. " }))
      )
      .expect(1)
      .mount(&server)
      .await;

    let generator = StoryGenerator::new(test_config(&server, 3))
      .expect("valid config");
    let (result, attempts) = generator
      .generate_traced(&haunted_mill())
      .await;

    assert_eq!(result, GenerationResult::Success("A tale.".to_string()));
    assert_eq!(attempts.len(), 3);
    assert_eq!(attempts[2].outcome, Ok("A tale.".to_string()));
}

#[tokio::test]
async fn test_malformed_body_is_not_retried()
{   let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path(GENERATE_PATH))
      .respond_with(
        ResponseTemplate::new(200).set_body_string("definitely not json")
      )
      .expect(1)
      .mount(&server)
      .await;

    let generator = StoryGenerator::new(test_config(&server, 3))
      .expect("valid config");
    let (result, attempts) = generator
      .generate_traced(&haunted_mill())
      .await;

    assert_eq!(attempts.len(), 1);
    assert!(!result.is_success());
    assert!(result.text().contains("JSON decode error"));
    assert!(result.text().contains("'a haunted mill'"));
}

#[tokio::test]
async fn test_missing_response_field_is_not_retried()
{   let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path(GENERATE_PATH))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(json!({ "model": "tinyllama", "done": true }))
      )
      .expect(1)
      .mount(&server)
      .await;

    let generator = StoryGenerator::new(test_config(&server, 3))
      .expect("valid config");
    let (result, attempts) = generator
      .generate_traced(&haunted_mill())
      .await;

    assert_eq!(attempts.len(), 1);
    assert_eq!(
      result,
      GenerationResult::Fallback(
        "Could not generate story due to technical difficulties. \
         Original prompt was: 'a haunted mill'. \
         Error: No response from AI model".to_string()
      )
    );
}

#[tokio::test]
async fn test_non_string_response_is_not_retried()
{   let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path(GENERATE_PATH))
      .respond_with(
        ResponseTemplate::new(200).set_body_json(json!({ "response": 42 }))
      )
      .expect(1)
      .mount(&server)
      .await;

    let generator = StoryGenerator::new(test_config(&server, 3))
      .expect("valid config");
    let (result, attempts) = generator
      .generate_traced(&haunted_mill())
      .await;

    assert_eq!(attempts.len(), 1);
    assert!(matches!(
      &attempts[0].outcome,
      Err(e) if e.kind() == ErrorKind::Unknown
    ));
    assert!(!result.is_success());
}

#[tokio::test]
async fn test_request_body_matches_ollama_api()
{   let server = MockServer::start().await;
    let request = GenerationRequest::new("a robot learns to paint")
      .with_word_count(300)
      .with_genre(Some("science fiction".to_string()));

    Mock::given(method("POST"))
      .and(path(GENERATE_PATH))
      .and(body_partial_json(json!({
        "model": "tinyllama",
        "prompt": request.full_prompt(),
        "stream": false,
        "options": { "num_ctx": 512 }
      })))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(json!({ "response": "Brushstrokes.\n" }))
      )
      .expect(1)
      .mount(&server)
      .await;

    let generator = StoryGenerator::new(test_config(&server, 1))
      .expect("valid config");
    let result = generator.generate(&request).await;

    assert_eq!(result, GenerationResult::Success("Brushstrokes.".to_string()));

    let received = server.received_requests().await
      .expect("request recording enabled");
    let body: serde_json::Value = serde_json::from_slice(&received[0].body)
      .expect("json body");
    let temperature = body["options"]["temperature"].as_f64()
      .expect("temperature");
    assert!((temperature - 0.7).abs() < 1e-6);
    assert!(body["prompt"].as_str().unwrap_or_default()
      .contains("Genre: Science fiction"));
}

#[tokio::test]
async fn test_timeout_is_retried_as_network_error()
{   let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path(GENERATE_PATH))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(json!({ "response": "too late" }))
          .set_delay(Duration::from_millis(500))
      )
      .mount(&server)
      .await;

    let config = GeneratorConfig
    {   timeout: Duration::from_millis(100)
      , ..test_config(&server, 2)
    };
    let generator = StoryGenerator::new(config).expect("valid config");
    let (result, attempts) = generator
      .generate_traced(&haunted_mill())
      .await;

    assert_eq!(attempts.len(), 2);
    assert!(attempts.iter().all(|a| {
      matches!(&a.outcome, Err(e) if e.kind() == ErrorKind::Network)
    }));
    assert!(result.text().contains("timed out"));
}

#[tokio::test]
async fn test_connection_refused_falls_back()
{   // nothing listens on port 1
    let config = GeneratorConfig
    {   endpoint: "http://127.0.0.1:1/api/generate".to_string()
      , max_retries: 2
      , retry_delay: Duration::from_millis(10)
      , timeout: Duration::from_secs(2)
      , ..GeneratorConfig::default()
    };
    let generator = StoryGenerator::new(config).expect("valid config");
    let (result, attempts) = generator
      .generate_traced(&haunted_mill())
      .await;

    assert_eq!(attempts.len(), 2);
    assert!(matches!(result, GenerationResult::Fallback(_)));
    assert!(result.text().contains("Network error"));
}

#[tokio::test]
async fn test_invalid_config_is_rejected()
{   let config = GeneratorConfig
    {   endpoint: String::new()
      , ..GeneratorConfig::default()
    };
    let err = StoryGenerator::new(config).err().expect("invalid config");
    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
}
