use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{config_for, page, run, stderr, stdout};

async fn mount_folders(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v2/folders"))
        .and(query_param("projectKey", "P"))
        .and(query_param("folderType", "TEST_CASE"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            { "id": 3, "name": "Billing", "parentId": null },
            { "id": 2, "name": "Auth", "parentId": 1 },
            { "id": 1, "name": "Root", "parentId": null }
        ]))))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn folders_only_json() {
    let server = MockServer::start().await;
    mount_folders(&server).await;
    let (_dir, config) = config_for(&server);

    let output = run(&config, &["folder", "tree"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let forest: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        forest,
        json!([
            { "id": 3, "name": "Billing", "children": [], "testCases": [] },
            {
                "id": 1,
                "name": "Root",
                "children": [
                    { "id": 2, "name": "Auth", "children": [], "testCases": [] }
                ],
                "testCases": []
            }
        ])
    );
    // No test case requests without a test case flag.
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() == "/v2/folders"));
}

#[tokio::test(flavor = "multi_thread")]
async fn bounded_test_cases_as_text() {
    let server = MockServer::start().await;
    mount_folders(&server).await;
    Mock::given(method("GET"))
        .and(path("/v2/testcases"))
        .and(query_param("folderId", "1"))
        .and(query_param("maxResults", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": [{ "id": 10, "key": "P-T1", "name": "Login" }],
            "next": "https://api.zephyrscale.smartbear.com/v2/testcases?startAt=1"
        })))
        .mount(&server)
        .await;
    for folder_id in ["2", "3"] {
        Mock::given(method("GET"))
            .and(path("/v2/testcases"))
            .and(query_param("folderId", folder_id))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]))))
            .mount(&server)
            .await;
    }
    let (_dir, config) = config_for(&server);

    let output = run(
        &config,
        &["folder", "tree", "--max-test-cases", "1", "--format", "text"],
    )
    .await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let expected = [
        "Billing/ (3)",
        "Root/ (1)",
        "├── P-T1: Login",
        "├── ...",
        "└── Auth/ (2)",
    ]
    .join("\n");
    assert_eq!(stdout(&output), format!("{}\n", expected));
}

#[tokio::test(flavor = "multi_thread")]
async fn failing_test_case_listing_names_the_folder() {
    let server = MockServer::start().await;
    mount_folders(&server).await;
    Mock::given(method("GET"))
        .and(path("/v2/testcases"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let (_dir, config) = config_for(&server);

    let output = run(&config, &["folder", "tree", "--all-test-cases"]).await;
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.contains("Error: Failed to fetch test cases for folder"), "{}", err);
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_project_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/folders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]))))
        .mount(&server)
        .await;
    let (_dir, config) = config_for(&server);

    let output = run(&config, &["folder", "tree", "--format", "text"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "(No folders)\n");
}
