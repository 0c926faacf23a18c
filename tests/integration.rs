use base64::Engine as _;
use scene_composer::{
    ai::{GeminiEditClient, ImageEditService},
    app::App,
    encoder::{encode_all, ImageFile},
    models::Config,
    prompts::PromptStyle,
    session::{Phase, Session},
    Error,
};
use std::fs;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-2.5-flash-image";

fn config(server: &MockServer, prompt_style: PromptStyle, timeout: Duration) -> Config {
    Config {
        gemini_api_key: "test-key".to_string(),
        image_model: MODEL.to_string(),
        prompt_style,
        base_url: server.uri(),
        request_timeout: timeout,
    }
}

fn b64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[tokio::test]
async fn test_full_workflow_with_mock_server() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let alice = dir.path().join("alice.JPG");
    let bob = dir.path().join("bob.png");
    fs::write(&alice, [0xFF, 0xD8, 0xFF, 0xE0, 0x01]).unwrap();
    fs::write(&bob, [0x89, 0x50, 0x4E, 0x47, 0x02]).unwrap();

    let generated = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x42];

    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{}:generateContent", MODEL)))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": "image/jpeg", "data": b64(&[0xFF, 0xD8, 0xFF, 0xE0, 0x01]) } },
                    { "inlineData": { "mimeType": "image/png", "data": b64(&[0x89, 0x50, 0x4E, 0x47, 0x02]) } },
                    { "text": "Alice and Bob hiking in Patagonia" }
                ]
            }],
            "generationConfig": { "responseModalities": ["IMAGE"] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "inlineData": { "mimeType": "image/png", "data": b64(&generated) } }]
                },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = App::new(&config(&server, PromptStyle::Verbatim, Duration::from_secs(10)));

    let session = Session::new()
        .select(vec![ImageFile::from_path(&alice), ImageFile::from_path(&bob)])
        .unwrap()
        .with_prompt("Alice and Bob hiking in Patagonia")
        .unwrap();
    assert_eq!(session.preview_ids().len(), 2);

    let session = app.submit(&session).await.unwrap();
    assert_eq!(session.phase(), Phase::Succeeded);

    let result = session.result().unwrap();
    assert_eq!(result.data, generated);
    assert!(result.to_data_url().starts_with("data:image/png;base64,"));

    assert_eq!(session.reset().unwrap().phase(), Phase::Empty);
}

#[tokio::test]
async fn test_blocked_generation_surfaces_safety_summary() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{}:generateContent", MODEL)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "I can't create that image." }] },
                "finishReason": "IMAGE_SAFETY",
                "safetyRatings": [
                    { "category": "VIOLENCE", "probability": "LOW" },
                    { "category": "HARASSMENT", "probability": "NEGLIGIBLE" }
                ]
            }]
        })))
        .mount(&server)
        .await;

    let app = App::new(&config(
        &server,
        PromptStyle::PreserveIdentity,
        Duration::from_secs(10),
    ));

    let session = Session::new()
        .select(vec![ImageFile::from_bytes("me.webp", vec![1, 2, 3])])
        .unwrap()
        .with_prompt("a sword fight")
        .unwrap();

    let session = app.submit(&session).await.unwrap();
    assert_eq!(session.phase(), Phase::Failed);

    let error = session.error().unwrap();
    assert!(matches!(error, Error::NoImageProduced { .. }));
    let message = error.to_string();
    assert!(message.contains("No image was generated"));
    assert!(message.contains("IMAGE_SAFETY"));
    assert!(message.contains("VIOLENCE (LOW), HARASSMENT (NEGLIGIBLE)"));
}

#[tokio::test]
async fn test_slow_remote_surfaces_uniform_timeout_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = GeminiEditClient::from_config(&config(
        &server,
        PromptStyle::Verbatim,
        Duration::from_millis(100),
    ));

    let images = encode_all(&[ImageFile::from_bytes("me.png", vec![0])])
        .await
        .unwrap();
    let err = client
        .generate_edited_image("anything", &images)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Generation(_)));
    assert!(err.to_string().contains("timeout"));
}

#[tokio::test]
async fn test_empty_image_list_is_rejected_by_client() {
    let server = MockServer::start().await;
    let client = GeminiEditClient::from_config(&config(
        &server,
        PromptStyle::Verbatim,
        Duration::from_secs(1),
    ));

    let err = client
        .generate_edited_image("anything", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
}
