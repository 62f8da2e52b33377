use std::collections::{HashMap, HashSet};

use zephyr_sdk::fetch_all;
use zephyr_sdk::types::Folder;

use super::build::build_forest;
use super::render::{NO_FOLDER_ID, NO_FOLDER_NAME};
use super::{TestCaseRef, TreeError, TreeNode, TreeSource, PAGE_SIZE};

/// Test case key from a locator such as
/// `https://.../v2/testcases/PROJ-T12/versions/1`.
pub fn test_case_key_from_link(link: &str) -> Option<String> {
    const MARKER: &str = "testcases/";
    let start = link.find(MARKER)? + MARKER.len();
    let key: String = link[start..]
        .chars()
        .take_while(|c| !matches!(c, '/' | '?' | '#'))
        .collect();
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// Build the forest of folders holding the test cases executed in a cycle.
///
/// Only folders on the path from a root to a test case appear. Test cases
/// outside any folder are collected under a synthetic `(No Folder)` root,
/// appended last. A cycle without resolvable executions yields an empty forest.
pub async fn cycle_tree<S: TreeSource>(
    source: &S,
    test_cycle_key: &str,
) -> Result<Vec<TreeNode>, TreeError> {
    tracing::info!("Fetching tree for test cycle: {}", test_cycle_key);
    tracing::info!("This may take a while...");

    let executions = fetch_all(PAGE_SIZE, move |start_at, max_results| {
        source.executions_page(test_cycle_key, start_at, max_results)
    })
    .await?;
    tracing::info!("Found {} test execution(s)", executions.len());

    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for execution in &executions {
        let link = execution
            .test_case
            .as_ref()
            .and_then(|tc| tc.self_link.as_deref());
        match link.and_then(test_case_key_from_link) {
            Some(key) => {
                if seen.insert(key.clone()) {
                    keys.push(key);
                }
            }
            None => tracing::warn!(
                "Skipping execution {} without a test case link",
                execution.reference().unwrap_or_else(|| "?".to_string())
            ),
        }
    }
    if keys.is_empty() {
        return Ok(Vec::new());
    }

    tracing::info!("Fetching {} test case(s)...", keys.len());
    let mut test_cases = Vec::with_capacity(keys.len());
    for key in &keys {
        tracing::debug!("Fetching test case: {}", key);
        test_cases.push(source.test_case(key).await?);
    }

    tracing::info!("Fetching folder details...");
    let mut fetched: HashMap<i64, usize> = HashMap::new();
    let mut folders: Vec<Folder> = Vec::new();
    for folder_id in test_cases.iter().filter_map(|tc| tc.folder_id()) {
        let mut next = Some(folder_id);
        while let Some(id) = next {
            if fetched.contains_key(&id) {
                break;
            }
            tracing::debug!("Fetching folder: {}", id);
            let folder = source
                .folder(id)
                .await
                .map_err(|e| TreeError::FolderFetch {
                    folder_id: id,
                    source: e,
                })?;
            next = folder.parent_id;
            fetched.insert(id, folders.len());
            folders.push(folder);
        }
    }
    tracing::info!("Found {} folder(s)", folders.len());

    tracing::info!("Building tree...");
    let mut by_folder: HashMap<i64, Vec<TestCaseRef>> = HashMap::new();
    let mut no_folder: Vec<TestCaseRef> = Vec::new();
    for tc in test_cases {
        match tc.folder_id() {
            Some(id) => by_folder.entry(id).or_default().push(tc.into()),
            None => no_folder.push(tc.into()),
        }
    }

    let mut forest = build_forest(folders)?;
    let mut stack: Vec<&mut TreeNode> = forest.iter_mut().collect();
    while let Some(node) = stack.pop() {
        node.test_cases = by_folder.remove(&node.id).unwrap_or_default();
        stack.extend(node.children.iter_mut());
    }

    if !no_folder.is_empty() {
        let mut bucket = TreeNode::new(NO_FOLDER_ID, NO_FOLDER_NAME);
        bucket.test_cases = no_folder;
        forest.push(bucket);
    }
    Ok(forest)
}
