use super::*;
use zephyr_sdk::types::{FolderType, StatusType};

// ── Folders ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn folders_sends_all_filters() {
    let (server, client) = setup().await;
    let _ = client
        .folders()
        .project_key("PROJ")
        .folder_type(FolderType::TestCase)
        .max_results(100)
        .start_at(200)
        .send()
        .await;
    let (path, query) = extract_query(&server.received_requests().await.unwrap());
    assert_eq!(path, "/v2/folders");
    assert_eq!(query["projectKey"], "PROJ");
    assert_eq!(query["folderType"], "TEST_CASE");
    assert_eq!(query["maxResults"], "100");
    assert_eq!(query["startAt"], "200");
}

#[tokio::test]
async fn unset_filters_are_not_sent() {
    let (server, client) = setup().await;
    let _ = client.folders().send().await;
    let (_, query) = extract_query(&server.received_requests().await.unwrap());
    assert!(query.is_empty(), "unexpected query: {:?}", query);
}

// ── Test cases ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_cases_folder_filter() {
    let (server, client) = setup().await;
    let _ = client
        .test_cases()
        .project_key("PROJ")
        .folder_id(42)
        .send()
        .await;
    let (path, query) = extract_query(&server.received_requests().await.unwrap());
    assert_eq!(path, "/v2/testcases");
    assert_eq!(query["folderId"], "42");
    assert_eq!(query["projectKey"], "PROJ");
}

#[tokio::test]
async fn test_steps_path_includes_key() {
    let (server, client) = setup().await;
    let _ = client.test_steps("PROJ-T7").max_results(5).send().await;
    let (path, query) = extract_query(&server.received_requests().await.unwrap());
    assert_eq!(path, "/v2/testcases/PROJ-T7/teststeps");
    assert_eq!(query["maxResults"], "5");
}

// ── Test executions ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_executions_filters() {
    let (server, client) = setup().await;
    let _ = client
        .test_executions()
        .project_key("PROJ")
        .test_cycle("PROJ-R1")
        .test_case("PROJ-T1")
        .actual_end_date_after("2024-01-01T00:00:00Z")
        .actual_end_date_before("2024-02-01T00:00:00Z")
        .only_last_executions(true)
        .send()
        .await;
    let (path, query) = extract_query(&server.received_requests().await.unwrap());
    assert_eq!(path, "/v2/testexecutions");
    assert_eq!(query["testCycle"], "PROJ-R1");
    assert_eq!(query["testCase"], "PROJ-T1");
    assert_eq!(query["actualEndDateAfter"], "2024-01-01T00:00:00Z");
    assert_eq!(query["actualEndDateBefore"], "2024-02-01T00:00:00Z");
    assert_eq!(query["onlyLastExecutions"], "true");
}

// ── Settings ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn statuses_type_filter() {
    let (server, client) = setup().await;
    let _ = client
        .statuses()
        .project_key("PROJ")
        .status_type(StatusType::TestCycle)
        .send()
        .await;
    let (path, query) = extract_query(&server.received_requests().await.unwrap());
    assert_eq!(path, "/v2/statuses");
    assert_eq!(query["statusType"], "TEST_CYCLE");
}

#[tokio::test]
async fn projects_list_decodes_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "values": [{ "id": 1, "key": "PROJ", "jiraProjectId": 10000, "enabled": true }],
            "startAt": 0,
            "maxResults": 1,
            "next": "https://api.zephyrscale.smartbear.com/v2/projects?startAt=1"
        })))
        .mount(&server)
        .await;
    let client = Client::from_token("test-token")
        .unwrap()
        .with_base_url(server.uri());

    let page = client.projects().max_results(1).send().await.unwrap();
    assert_eq!(page.values.len(), 1);
    assert_eq!(page.values[0].key.as_deref(), Some("PROJ"));
    assert!(page.has_next);
}

#[tokio::test]
async fn issue_links_decode_bare_arrays() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "key": "PROJ-T1", "version": 1, "self": "https://api/testcases/PROJ-T1/versions/1" }
        ])))
        .mount(&server)
        .await;
    let client = Client::from_token("test-token")
        .unwrap()
        .with_base_url(server.uri());

    let links = client.issue_link_test_cases("PROJ-123").await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].key.as_deref(), Some("PROJ-T1"));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.path(), "/issuelinks/PROJ-123/testcases");
}
