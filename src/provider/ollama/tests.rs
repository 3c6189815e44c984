use super::*;
use crate::config::{Config, OllamaConfig};

fn test_config() -> Config {
    Config {
        ollama: OllamaConfig {
            host: "test-host".to_string(),
            port: 1234,
            embedding_model: "test-embed".to_string(),
            generation_model: "test-gen".to_string(),
            batch_size: 128,
        },
        ..Config::default()
    }
}

#[test]
fn client_configuration() {
    let client = OllamaClient::new(&test_config()).expect("Failed to create client");

    assert_eq!(client.embedding_model, "test-embed");
    assert_eq!(client.generation_model, "test-gen");
    assert_eq!(client.batch_size, 128);
    assert_eq!(client.base_url.host_str(), Some("test-host"));
    assert_eq!(client.base_url.port(), Some(1234));
    assert_eq!(client.retry_attempts, DEFAULT_RETRY_ATTEMPTS);
}

#[test]
fn client_builder_methods() {
    let client = OllamaClient::new(&Config::default())
        .expect("Failed to create client")
        .with_timeout(Duration::from_secs(60))
        .with_retry_attempts(5);

    assert_eq!(client.retry_attempts, 5);
}

#[test]
fn embed_request_serialization() {
    let request = EmbedRequest {
        model: "test-embed".to_string(),
        prompt: "hello".to_string(),
    };
    let json = serde_json::to_string(&request).expect("should serialize");
    assert!(json.contains("\"model\":\"test-embed\""));
    assert!(json.contains("\"prompt\":\"hello\""));
}

#[test]
fn batch_embed_request_uses_input_field() {
    let request = BatchEmbedRequest {
        model: "test-embed".to_string(),
        inputs: vec!["a".to_string(), "b".to_string()],
    };
    let json = serde_json::to_string(&request).expect("should serialize");
    assert!(json.contains("\"input\":[\"a\",\"b\"]"));
}

#[test]
fn generate_request_serialization() {
    let request = GenerateRequest {
        model: "test-gen".to_string(),
        prompt: "Question: why?".to_string(),
        stream: false,
        options: SamplingOptions {
            temperature: 0.0,
            num_predict: 256,
        },
    };
    let json = serde_json::to_string(&request).expect("should serialize");
    assert!(json.contains("\"stream\":false"));
    assert!(json.contains("\"temperature\":0.0"));
    assert!(json.contains("\"num_predict\":256"));
}

#[test]
fn generate_response_parsing() {
    let json = r#"{"model":"test-gen","response":"Paris is the capital.","done":true}"#;
    let parsed: GenerateResponse = serde_json::from_str(json).expect("should parse");
    assert_eq!(parsed.response, "Paris is the capital.");
}
