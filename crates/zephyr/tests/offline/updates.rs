use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{config_for, page, run, stderr, stdout};

#[tokio::test(flavor = "multi_thread")]
async fn testcase_update_merges_into_current_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/testcases/P-T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 10,
            "key": "P-T1",
            "name": "Old name",
            "objective": "Keep me",
            "customFields": { "risk": "low", "team": "core" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v2/testcases/P-T1"))
        .and(body_partial_json(json!({
            "name": "New name",
            "objective": "Keep me",
            "customFields": { "risk": "high", "team": "core" }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let (_dir, config) = config_for(&server);

    let output = run(
        &config,
        &[
            "testcase",
            "update",
            "P-T1",
            "--name",
            "New name",
            "--custom-field",
            "risk=high",
        ],
    )
    .await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let result: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(result, json!({ "key": "P-T1", "updated": true }));
}

#[tokio::test(flavor = "multi_thread")]
async fn single_execution_update_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/testexecutions/P-E1"))
        .and(body_json(json!({ "statusName": "Fail", "comment": "Timeout" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/testexecutions/P-E1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "key": "P-E1",
            "comment": "Timeout"
        })))
        .mount(&server)
        .await;
    let (_dir, config) = config_for(&server);

    let output = run(
        &config,
        &[
            "testexecution",
            "update",
            "P-E1",
            "--status-name",
            "Fail",
            "--comment",
            "Timeout",
        ],
    )
    .await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let execution: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(execution["key"], "P-E1");
}

#[tokio::test(flavor = "multi_thread")]
async fn bulk_execution_update_reports_each_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/testexecutions"))
        .and(query_param("testCycle", "P-R1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            { "id": 1, "key": "P-E1" },
            { "id": 2, "key": "P-E2" }
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v2/testexecutions/P-E1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v2/testexecutions/P-E2"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&server)
        .await;
    let (_dir, config) = config_for(&server);

    let output = run(
        &config,
        &[
            "testexecution",
            "update",
            "--test-cycle",
            "P-R1",
            "--status-name",
            "Pass",
        ],
    )
    .await;
    assert!(!output.status.success());
    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["testCycle"], "P-R1");
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["success"], 1);
    assert_eq!(summary["failed"], 1);
    assert_eq!(summary["results"][0], json!({ "key": "P-E1", "success": true }));
    assert_eq!(summary["results"][1]["success"], false);
    assert!(summary["results"][1]["error"]
        .as_str()
        .unwrap()
        .contains("gone"));
    assert!(stderr(&output).contains("1 of 2 test execution update(s) failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn bulk_update_of_empty_cycle_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/testexecutions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]))))
        .mount(&server)
        .await;
    let (_dir, config) = config_for(&server);

    let output = run(
        &config,
        &["testexecution", "update", "--test-cycle", "P-R2", "--comment", "x"],
    )
    .await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());
}
