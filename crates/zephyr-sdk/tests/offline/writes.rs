use super::*;
use zephyr_sdk::inputs::*;
use zephyr_sdk::types::{Folder, FolderType, StepMode};

// ── Creates ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_folder_posts_body() {
    let (server, client) = setup_write(
        "POST",
        201,
        serde_json::json!({ "id": 77, "self": "https://api/folders/77" }),
    )
    .await;
    let created = client
        .create_folder(&FolderCreateInput {
            project_key: "PROJ".to_string(),
            name: "Smoke".to_string(),
            folder_type: FolderType::TestCycle,
            parent_id: Some(3),
        })
        .await
        .unwrap();
    assert_eq!(created.id, Some(77));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.path(), "/v2/folders");
    let body = extract_body(&requests);
    assert_eq!(body["folderType"], "TEST_CYCLE");
    assert_eq!(body["parentId"], 3);
}

#[tokio::test]
async fn create_test_case_returns_key() {
    let (server, client) = setup_write(
        "POST",
        201,
        serde_json::json!({ "id": 1, "key": "PROJ-T9", "self": "https://api/testcases/PROJ-T9" }),
    )
    .await;
    let created = client
        .create_test_case(&TestCaseCreateInput {
            project_key: "PROJ".to_string(),
            name: "Checkout".to_string(),
            labels: Some(vec!["smoke".to_string()]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.key.as_deref(), Some("PROJ-T9"));

    let body = extract_body(&server.received_requests().await.unwrap());
    assert_eq!(body["labels"], serde_json::json!(["smoke"]));
    assert!(body.get("objective").is_none());
}

#[tokio::test]
async fn create_test_steps_posts_mode_and_items() {
    let (server, client) = setup_write("POST", 201, serde_json::json!({ "id": 5 })).await;
    client
        .create_test_steps(
            "PROJ-T1",
            &TestStepsInput {
                mode: StepMode::Overwrite,
                items: vec![TestStepInput::Inline(InlineStepInput {
                    description: "Log in".to_string(),
                    ..Default::default()
                })],
            },
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.path(), "/v2/testcases/PROJ-T1/teststeps");
    let body = extract_body(&requests);
    assert_eq!(body["mode"], "OVERWRITE");
    assert_eq!(body["items"][0]["inline"]["description"], "Log in");
}

// ── Updates ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_test_execution_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let client = Client::from_token("test-token")
        .unwrap()
        .with_base_url(format!("{}/v2", server.uri()));

    client
        .update_test_execution(
            "PROJ-E1",
            &TestExecutionUpdateInput {
                status_name: Some("Pass".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.path(), "/v2/testexecutions/PROJ-E1");
    assert_eq!(
        extract_body(&requests),
        serde_json::json!({ "statusName": "Pass" })
    );
}

#[tokio::test]
async fn update_environment_puts_full_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let client = Client::from_token("test-token")
        .unwrap()
        .with_base_url(format!("{}/v2", server.uri()));

    let body = serde_json::json!({ "id": 4, "name": "Staging", "index": 1 });
    client.update_environment(4, &body).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.path(), "/v2/environments/4");
    assert_eq!(extract_body(&requests), body);
}

// ── Reads ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn typed_and_raw_reads_of_the_same_folder() {
    let (server, client) = setup_write(
        "GET",
        200,
        serde_json::json!({ "id": 9, "name": "API", "parentId": 2, "extra": "kept" }),
    )
    .await;

    let folder: Folder = client.folder(9).await.unwrap();
    assert_eq!(folder.parent_id, Some(2));
    let raw: Value = client.folder(9).await.unwrap();
    assert_eq!(raw["extra"], "kept");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn missing_test_case_is_not_found() {
    let (_server, client) = setup_write("GET", 404, serde_json::json!({ "message": "nope" })).await;
    let err = client.test_case::<Value>("PROJ-T404").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().starts_with("Not found"));
}
