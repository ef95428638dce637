//! Integration tests for `SeoGenerator` against a wiremock chat-completions
//! server.

use seometa_core::ProductInput;
use seometa_generator::{
    generate_fallback, ChatClient, GenerationError, GenerationSource, SeoGenerator, SYSTEM_PROMPT,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn product() -> ProductInput {
    ProductInput {
        name: "Blue Wireless Headphones Pro".to_owned(),
        short_description: Some("Premium wireless headphones with ANC".to_owned()),
        description: Some("40-hour battery life.".to_owned()),
        country: "BR".to_owned(),
        language: "pt-BR".to_owned(),
    }
}

fn ai_generator(base_url: &str) -> SeoGenerator {
    let chat = ChatClient::new(base_url, "sk-test", "gpt-4o-mini", 0.4, 5, 5)
        .expect("client construction should not fail");
    SeoGenerator::new(Some(chat))
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

async fn mount_completion(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn without_credential_output_equals_fallback() {
    let generator = SeoGenerator::fallback_only();
    assert!(!generator.ai_enabled());

    let generated = generator.generate(&product()).await;

    assert_eq!(generated.source, GenerationSource::Fallback);
    assert_eq!(generated.output, generate_fallback(&product()));
}

#[tokio::test]
async fn valid_completion_is_returned_as_ai_output() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "gpt-4o-mini" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#" {"meta_title":"Fone Bluetooth Pro Azul","meta_description":"Som imersivo e 40h de bateria. Confira!","meta_keywords":"fone, bluetooth, azul, anc, sem fio"} "#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let generated = ai_generator(&server.uri()).generate(&product()).await;

    assert_eq!(generated.source, GenerationSource::Ai);
    assert_eq!(generated.output.meta_title, "Fone Bluetooth Pro Azul");
    assert_eq!(generated.output.meta_keywords, "fone, bluetooth, azul, anc, sem fio");
}

#[tokio::test]
async fn request_carries_system_prompt_and_temperature() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(completion(
            r#"{"meta_title":"T","meta_description":"D","meta_keywords":"a, b"}"#,
        )),
    )
    .await;

    ai_generator(&server.uri()).generate(&product()).await;

    let requests = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    assert_eq!(requests.len(), 1, "AI call is attempted exactly once");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).expect("json body");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
    assert_eq!(body["messages"][1]["role"], "user");
    assert!(body["messages"][1]["content"]
        .as_str()
        .expect("user content")
        .contains("- Name: Blue Wireless Headphones Pro"));
    let temperature = body["temperature"].as_f64().expect("temperature");
    assert!((temperature - 0.4).abs() < 1e-6);
}

#[tokio::test]
async fn invalid_json_completion_falls_back() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(completion("Sure! Here is your metadata.")),
    )
    .await;

    let generated = ai_generator(&server.uri()).generate(&product()).await;

    assert_eq!(generated.source, GenerationSource::Fallback);
    assert_eq!(generated.output, generate_fallback(&product()));
}

#[tokio::test]
async fn incomplete_completion_falls_back() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(completion(
            r#"{"meta_title":"X","meta_description":"","meta_keywords":"a,b"}"#,
        )),
    )
    .await;

    let generator = ai_generator(&server.uri());
    let err = generator
        .generate_with_ai(&product())
        .await
        .expect_err("empty description is incomplete");
    assert!(matches!(err, GenerationError::IncompleteResult), "got {err:?}");

    let generated = generator.generate(&product()).await;
    assert_eq!(generated.source, GenerationSource::Fallback);
}

#[tokio::test]
async fn service_error_status_falls_back() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "You exceeded your current quota", "type": "insufficient_quota" }
        })),
    )
    .await;

    let generator = ai_generator(&server.uri());
    let err = generator
        .generate_with_ai(&product())
        .await
        .expect_err("429 is an error");
    assert!(
        matches!(err, GenerationError::ServiceStatus { status: 429, ref body } if body.contains("quota")),
        "got {err:?}"
    );

    let generated = generator.generate(&product()).await;
    assert_eq!(generated.source, GenerationSource::Fallback);
    assert!(generated.output.is_complete());
}

#[tokio::test]
async fn empty_choices_fall_back() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })),
    )
    .await;

    let generator = ai_generator(&server.uri());
    let err = generator
        .generate_with_ai(&product())
        .await
        .expect_err("no choices");
    assert!(matches!(err, GenerationError::EmptyCompletion), "got {err:?}");
    assert_eq!(
        generator.generate(&product()).await.source,
        GenerationSource::Fallback
    );
}

#[tokio::test]
async fn unreachable_service_falls_back() {
    let generator = ai_generator("http://127.0.0.1:1");
    let generated = generator.generate(&product()).await;
    assert_eq!(generated.source, GenerationSource::Fallback);
    assert_eq!(generated.output, generate_fallback(&product()));
}
