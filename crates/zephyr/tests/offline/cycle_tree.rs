use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{config_for, page, run, stderr, stdout};

fn link(key: &str) -> String {
    format!("https://api.zephyrscale.smartbear.com/v2/testcases/{}/versions/1", key)
}

async fn mount_get(server: &MockServer, url_path: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn cycle_tree_walks_up_to_root_folders() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/testexecutions"))
        .and(query_param("testCycle", "P-R1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            { "id": 1, "key": "P-E1", "testCase": { "id": 10, "self": link("P-T1") } },
            { "id": 2, "key": "P-E2", "testCase": { "id": 11, "self": link("P-T2") } },
            { "id": 3, "key": "P-E3", "testCase": { "id": 10, "self": link("P-T1") } },
            { "id": 4, "key": "P-E4" }
        ]))))
        .mount(&server)
        .await;
    mount_get(
        &server,
        "/v2/testcases/P-T1",
        json!({ "id": 10, "key": "P-T1", "name": "Login", "folder": { "id": 2 } }),
    )
    .await;
    mount_get(
        &server,
        "/v2/testcases/P-T2",
        json!({ "id": 11, "key": "P-T2", "name": "Loose", "folder": null }),
    )
    .await;
    mount_get(
        &server,
        "/v2/folders/2",
        json!({ "id": 2, "name": "Auth", "parentId": 1 }),
    )
    .await;
    mount_get(
        &server,
        "/v2/folders/1",
        json!({ "id": 1, "name": "Root", "parentId": null }),
    )
    .await;
    let (_dir, config) = config_for(&server);

    let output = run(&config, &["testcycle", "tree", "P-R1", "--format", "text"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let expected = [
        "Root/ (1)",
        "└── Auth/ (2)",
        "    └── P-T1: Login",
        "(No Folder)/ (0)",
        "└── P-T2: Loose",
    ]
    .join("\n");
    assert_eq!(stdout(&output), format!("{}\n", expected));

    // The duplicated test case is fetched once.
    let requests = server.received_requests().await.unwrap();
    let t1_fetches = requests
        .iter()
        .filter(|r| r.url.path() == "/v2/testcases/P-T1")
        .count();
    assert_eq!(t1_fetches, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn cycle_tree_json_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/testexecutions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            { "id": 1, "key": "P-E1", "testCase": { "self": link("P-T1") } }
        ]))))
        .mount(&server)
        .await;
    mount_get(
        &server,
        "/v2/testcases/P-T1",
        json!({ "key": "P-T1", "name": "Login", "folder": { "id": 5 } }),
    )
    .await;
    mount_get(&server, "/v2/folders/5", json!({ "id": 5, "name": "Smoke" })).await;
    let (_dir, config) = config_for(&server);

    let output = run(&config, &["testcycle", "tree", "P-R1"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let forest: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        forest,
        json!([{
            "id": 5,
            "name": "Smoke",
            "children": [],
            "testCases": [{ "key": "P-T1", "name": "Login" }]
        }])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_cycle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/testexecutions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]))))
        .mount(&server)
        .await;
    let (_dir, config) = config_for(&server);

    let output = run(&config, &["testcycle", "tree", "P-R9"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "[]");

    let output = run(&config, &["testcycle", "tree", "P-R9", "--format", "text"]).await;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "(No test cases in this cycle)\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_folder_fails_the_command() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/testexecutions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            { "key": "P-E1", "testCase": { "self": link("P-T1") } }
        ]))))
        .mount(&server)
        .await;
    mount_get(
        &server,
        "/v2/testcases/P-T1",
        json!({ "key": "P-T1", "name": "Login", "folder": { "id": 8 } }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/v2/folders/8"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such folder"))
        .mount(&server)
        .await;
    let (_dir, config) = config_for(&server);

    let output = run(&config, &["testcycle", "tree", "P-R1"]).await;
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Error: Failed to fetch folder 8"));
}
