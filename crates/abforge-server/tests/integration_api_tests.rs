//! Integration tests for the REST API
//!
//! Build the real router over in-memory stores and the mock completion
//! provider, then drive it end-to-end with tower's oneshot.

use abforge_llm::{ChatClient, CodeGeneratorConfig, MockProvider};
use abforge_server::api::create_router;
use abforge_server::state::AppState;
use abforge_store::{MemoryBlobStore, MemoryDocumentStore};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Build a router over fresh memory stores with the given provider
fn app_with_provider(provider: Arc<MockProvider>, max_file_bytes: u64) -> Router {
    let state = AppState::new(
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(MemoryBlobStore::new()),
        provider as Arc<dyn ChatClient>,
        CodeGeneratorConfig::new("mock"),
        max_file_bytes,
    );
    create_router(state)
}

fn test_app() -> (Router, Arc<MockProvider>) {
    let provider = Arc::new(MockProvider::new());
    (app_with_provider(provider.clone(), 1024 * 1024), provider)
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn sample_binding_body() -> Value {
    json!({
        "name": "Pricing Binding",
        "actionButtonType": "forecast",
        "fields": [
            {"name": "SKU", "dataType": "array", "classification": "dimension", "required": true},
            {"name": "Price", "dataType": "number", "classification": "measure", "required": true}
        ]
    })
}

/// Create a binding and return its id
async fn create_binding(app: &Router) -> String {
    let (status, body) = send_json(app, "POST", "/bindings", sample_binding_body()).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

fn generate_body(binding_id: &str) -> Value {
    json!({
        "projectName": "My Project! 2",
        "actionButtonType": "forecast",
        "businessLogic": "Recalculate prices for all SKUs in scope",
        "fieldBindingId": binding_id,
    })
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app();
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_generate_missing_fields_is_400_with_no_downstream_calls() {
    let (app, provider) = test_app();
    let full = generate_body("some-binding");

    for missing in [
        "projectName",
        "actionButtonType",
        "businessLogic",
        "fieldBindingId",
    ] {
        let mut body = full.clone();
        body.as_object_mut().unwrap().remove(missing);

        let (status, response) = send_json(&app, "POST", "/generate", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["error"].as_str().unwrap().contains(missing));
    }

    // Blank counts as missing too
    let mut body = full.clone();
    body["projectName"] = json!("   ");
    let (status, _) = send_json(&app, "POST", "/generate", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The completion service was never reached
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_generate_unknown_binding_is_404() {
    let (app, provider) = test_app();

    let (status, body) = send_json(&app, "POST", "/generate", generate_body("absent")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("absent"));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_generate_end_to_end() {
    let (app, provider) = test_app();
    let binding_id = create_binding(&app).await;

    let (status, body) = send_json(&app, "POST", "/generate", generate_body(&binding_id)).await;
    assert_eq!(status, StatusCode::OK);

    let code_id = body["codeId"].as_str().unwrap();
    assert!(!code_id.is_empty());
    assert_eq!(body["projectName"], "My Project! 2");
    assert!(!body["generatedCode"].as_str().unwrap().is_empty());
    assert_eq!(body["usedExamples"], 0);
    assert_eq!(provider.call_count(), 1);

    // The persisted record is retrievable under the derived project id
    let (status, record) = get(
        &app,
        &format!("/generate/{}?projectId=myproject2", code_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["projectId"], "myproject2");
    assert_eq!(record["version"], "1.0.0");
    assert_eq!(record["status"], "generated");
    assert_eq!(record["fieldBindingId"], binding_id);
    assert_eq!(record["fieldBinding"]["fields"][0]["name"], "SKU");

    let (status, list) = get(&app, "/generate/project/myproject2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_record_requires_project_id() {
    let (app, _) = test_app();

    let (status, body) = get(&app, "/generate/some-id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("projectId"));
}

#[tokio::test]
async fn test_get_record_not_found() {
    let (app, _) = test_app();

    let (status, _) = get(&app, "/generate/some-id?projectId=myproject2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generate_resolves_binding_despite_wrong_type_hint() {
    let (app, _) = test_app();
    let binding_id = create_binding(&app).await;

    // The request's type differs from the binding's partition key; the
    // fallback scan must still resolve it
    let mut body = generate_body(&binding_id);
    body["actionButtonType"] = json!("allocation");

    let (status, response) = send_json(&app, "POST", "/generate", body).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!response["generatedCode"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_uses_uploaded_examples() {
    let (app, provider) = test_app();
    let binding_id = create_binding(&app).await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/knowledge",
        json!({
            "actionButtonType": "forecast",
            "fileName": "refresh.py",
            "description": "Nightly refresh",
            "content": "def main():\n    refresh()"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(&app, "POST", "/generate", generate_body(&binding_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["usedExamples"], 1);

    let request = provider.requests().pop().unwrap();
    assert!(request.prompt.contains("refresh.py"));
    assert!(request.prompt.contains("def main():\n    refresh()"));
}

#[tokio::test]
async fn test_generation_failure_is_502_and_persists_nothing() {
    let provider = Arc::new(MockProvider::failing("quota exceeded"));
    let app = app_with_provider(provider, 1024 * 1024);
    let binding_id = create_binding(&app).await;

    let (status, body) = send_json(&app, "POST", "/generate", generate_body(&binding_id)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("quota exceeded"));

    let (_, list) = get(&app, "/generate/project/myproject2").await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_regenerate_bumps_patch_version() {
    let (app, _) = test_app();
    let binding_id = create_binding(&app).await;

    let (_, body) = send_json(&app, "POST", "/generate", generate_body(&binding_id)).await;
    let code_id = body["codeId"].as_str().unwrap().to_string();

    let regen_body = json!({"modifications": "Add logging", "projectId": "myproject2"});
    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/generate/{}/regenerate", code_id),
        regen_body.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], "1.0.1");

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/generate/{}/regenerate", code_id),
        regen_body,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], "1.0.2");

    // The stored record reflects the regeneration
    let (_, record) = get(&app, &format!("/generate/{}?projectId=myproject2", code_id)).await;
    assert_eq!(record["status"], "regenerated");
    assert!(record["businessLogic"]
        .as_str()
        .unwrap()
        .contains("Modification request: Add logging"));
}

#[tokio::test]
async fn test_regenerate_validation_and_not_found() {
    let (app, _) = test_app();

    let (status, _) = send_json(
        &app,
        "POST",
        "/generate/some-id/regenerate",
        json!({"modifications": "x"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        "POST",
        "/generate/some-id/regenerate",
        json!({"modifications": "x", "projectId": "myproject2"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_regeneration_last_writer_wins() {
    let (app, _) = test_app();
    let binding_id = create_binding(&app).await;

    let (_, body) = send_json(&app, "POST", "/generate", generate_body(&binding_id)).await;
    let code_id = body["codeId"].as_str().unwrap().to_string();

    let regen = json!({"modifications": "tweak", "projectId": "myproject2"});
    let uri = format!("/generate/{}/regenerate", code_id);
    let (first, second) = tokio::join!(
        send_json(&app, "POST", &uri, regen.clone()),
        send_json(&app, "POST", &uri, regen.clone()),
    );
    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(second.0, StatusCode::OK);

    // No coordination exists, so the final version is whichever write
    // landed last - exactly one of the attempted increments, never a
    // corrupted value
    let (_, record) = get(&app, &format!("/generate/{}?projectId=myproject2", code_id)).await;
    let version = record["version"].as_str().unwrap();
    assert!(
        version == "1.0.1" || version == "1.0.2",
        "unexpected version {}",
        version
    );
}

#[tokio::test]
async fn test_download_sanitizes_filename() {
    let (app, _) = test_app();
    let binding_id = create_binding(&app).await;

    let mut body = generate_body(&binding_id);
    body["projectName"] = json!("../../etc");
    let (_, response) = send_json(&app, "POST", "/generate", body).await;
    let code_id = response["codeId"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/generate/{}/download?projectId=etc", code_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(disposition, "attachment; filename=\"etc.py\"");

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(!bytes.is_empty());
}

#[tokio::test]
async fn test_download_requires_project_id() {
    let (app, _) = test_app();
    let (status, _) = get(&app, "/generate/some-id/download").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_binding_crud_roundtrip() {
    let (app, _) = test_app();
    let binding_id = create_binding(&app).await;

    // Lookup with the right hint, a wrong hint, and no hint all resolve
    for uri in [
        format!("/bindings/{}?actionButtonType=forecast", binding_id),
        format!("/bindings/{}?actionButtonType=wrong", binding_id),
        format!("/bindings/{}", binding_id),
    ] {
        let (status, body) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"].as_str().unwrap(), binding_id);
    }

    // Update: rename and soft-disable
    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/bindings/{}", binding_id),
        json!({"name": "Renamed", "isActive": false}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Renamed");
    assert_eq!(body["isActive"], false);
    assert_eq!(body["id"].as_str().unwrap(), binding_id);

    // List
    let (status, list) = get(&app, "/bindings?actionButtonType=forecast").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Hard delete
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/bindings/{}", binding_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, _) = get(&app, &format!("/bindings/{}", binding_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_binding_clone() {
    let (app, _) = test_app();
    let binding_id = create_binding(&app).await;

    let (status, copy) = send_json(
        &app,
        "POST",
        &format!("/bindings/{}/clone", binding_id),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(copy["id"].as_str().unwrap(), binding_id);
    assert_eq!(copy["name"], "Pricing Binding (copy)");
    assert_eq!(copy["fields"].as_array().unwrap().len(), 2);

    let (_, list) = get(&app, "/bindings").await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_binding_validate_endpoint() {
    let (app, _) = test_app();

    let (status, report) = send_json(
        &app,
        "POST",
        "/bindings/validate",
        json!({"fields": sample_binding_body()["fields"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["valid"], true);

    // Dimension-only field list fails the invariant
    let (status, report) = send_json(
        &app,
        "POST",
        "/bindings/validate",
        json!({"fields": [
            {"name": "SKU", "dataType": "array", "classification": "dimension", "required": true}
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["valid"], false);
    assert!(report["errors"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e.as_str().unwrap().contains("measure")));
}

#[tokio::test]
async fn test_binding_templates_listing() {
    let (app, _) = test_app();

    let (status, templates) = get(&app, "/bindings/templates").await;
    assert_eq!(status, StatusCode::OK);
    let templates = templates.as_array().unwrap();
    assert!(!templates.is_empty());
    assert!(templates
        .iter()
        .all(|t| t["fields"].as_array().map_or(false, |f| !f.is_empty())));
}

#[tokio::test]
async fn test_knowledge_upload_list_content_delete() {
    let (app, _) = test_app();

    let (status, artifact) = send_json(
        &app,
        "POST",
        "/knowledge",
        json!({
            "actionButtonType": "forecast",
            "fileName": "refresh.py",
            "content": "def main():\n    pass"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let artifact_id = artifact["id"].as_str().unwrap().to_string();
    assert_eq!(artifact["category"], "knowledge");
    assert_eq!(artifact["fileType"], "text/x-python");
    assert_eq!(artifact["fileSize"], 20);

    let (status, list) = get(&app, "/knowledge?actionButtonType=forecast").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Raw content with the artifact's MIME type
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/knowledge/{}/content", artifact_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/x-python"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"def main():\n    pass");

    // Delete removes the pair
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/knowledge/{}", artifact_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, _) = get(&app, &format!("/knowledge/{}/content", artifact_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_knowledge_upload_enforces_size_ceiling() {
    let provider = Arc::new(MockProvider::new());
    let app = app_with_provider(provider, 16);

    let (status, body) = send_json(
        &app,
        "POST",
        "/knowledge",
        json!({
            "actionButtonType": "forecast",
            "fileName": "big.py",
            "content": "x".repeat(64)
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("16"));
}

#[tokio::test]
async fn test_malformed_json_body_is_400() {
    let (app, _) = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
