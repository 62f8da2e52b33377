//! Folder trees for `folder tree` and `testcycle tree`.
//!
//! Both commands produce a forest of [`TreeNode`]s. The folder path lists
//! every folder of the project and optionally hangs test cases under each
//! node; the test-cycle path starts from the executions of one cycle and
//! walks up to the folders that hold their test cases. Requests are issued
//! one at a time and nothing is printed until the forest is complete.

mod build;
mod cycle;
mod render;

use std::fmt;

use serde::Serialize;
use zephyr_sdk::types::{Folder, FolderType, TestCase, TestExecution};
use zephyr_sdk::{Client, Page, ZephyrError};

pub use build::{folder_tree, TestCaseMode};
pub use cycle::cycle_tree;
pub use render::render_text;

/// Page size used for every listing walked while building a tree.
pub const PAGE_SIZE: u32 = 100;

/// One folder in a rendered tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: i64,
    pub name: String,
    pub children: Vec<TreeNode>,
    pub test_cases: Vec<TestCaseRef>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_more_test_cases: bool,
}

impl TreeNode {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            children: Vec::new(),
            test_cases: Vec::new(),
            has_more_test_cases: false,
        }
    }
}

/// A test case leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCaseRef {
    pub key: String,
    pub name: String,
}

impl From<TestCase> for TestCaseRef {
    fn from(tc: TestCase) -> Self {
        Self {
            key: tc.key,
            name: tc.name,
        }
    }
}

/// Errors that abort a tree build.
#[derive(Debug)]
pub enum TreeError {
    /// A listing or lookup failed.
    Api(ZephyrError),
    /// Listing the test cases of a folder failed.
    TestCaseFetch { folder_id: i64, source: ZephyrError },
    /// A folder holding a test case, or one of its ancestors, could not be fetched.
    FolderFetch { folder_id: i64, source: ZephyrError },
    /// Folders whose parent chain never reaches a root.
    FolderCycle { folder_ids: Vec<i64> },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "{}", e),
            Self::TestCaseFetch { folder_id, source } => {
                write!(
                    f,
                    "Failed to fetch test cases for folder {}: {}",
                    folder_id, source
                )
            }
            Self::FolderFetch { folder_id, source } => {
                write!(f, "Failed to fetch folder {}: {}", folder_id, source)
            }
            Self::FolderCycle { folder_ids } => {
                let ids: Vec<String> = folder_ids.iter().map(|id| id.to_string()).collect();
                write!(
                    f,
                    "Folder hierarchy contains a cycle; unreachable folder(s): {}",
                    ids.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::TestCaseFetch { source, .. } | Self::FolderFetch { source, .. } => Some(source),
            Self::FolderCycle { .. } => None,
        }
    }
}

impl From<ZephyrError> for TreeError {
    fn from(e: ZephyrError) -> Self {
        Self::Api(e)
    }
}

/// The reads a tree build needs, scoped to one project.
pub trait TreeSource {
    async fn folders_page(&self, start_at: u32, max_results: u32)
        -> Result<Page<Folder>, ZephyrError>;

    async fn test_cases_page(
        &self,
        folder_id: i64,
        start_at: u32,
        max_results: u32,
    ) -> Result<Page<TestCase>, ZephyrError>;

    async fn executions_page(
        &self,
        test_cycle_key: &str,
        start_at: u32,
        max_results: u32,
    ) -> Result<Page<TestExecution>, ZephyrError>;

    async fn test_case(&self, key: &str) -> Result<TestCase, ZephyrError>;

    async fn folder(&self, id: i64) -> Result<Folder, ZephyrError>;
}

/// [`TreeSource`] backed by the Zephyr Scale API.
pub struct ApiSource<'a> {
    client: &'a Client,
    project_key: &'a str,
}

impl<'a> ApiSource<'a> {
    pub fn new(client: &'a Client, project_key: &'a str) -> Self {
        Self {
            client,
            project_key,
        }
    }
}

impl TreeSource for ApiSource<'_> {
    async fn folders_page(
        &self,
        start_at: u32,
        max_results: u32,
    ) -> Result<Page<Folder>, ZephyrError> {
        self.client
            .folders()
            .project_key(self.project_key)
            .folder_type(FolderType::TestCase)
            .start_at(start_at)
            .max_results(max_results)
            .send()
            .await
    }

    async fn test_cases_page(
        &self,
        folder_id: i64,
        start_at: u32,
        max_results: u32,
    ) -> Result<Page<TestCase>, ZephyrError> {
        self.client
            .test_cases()
            .project_key(self.project_key)
            .folder_id(folder_id)
            .start_at(start_at)
            .max_results(max_results)
            .send()
            .await
    }

    async fn executions_page(
        &self,
        test_cycle_key: &str,
        start_at: u32,
        max_results: u32,
    ) -> Result<Page<TestExecution>, ZephyrError> {
        self.client
            .test_executions()
            .project_key(self.project_key)
            .test_cycle(test_cycle_key)
            .start_at(start_at)
            .max_results(max_results)
            .send()
            .await
    }

    async fn test_case(&self, key: &str) -> Result<TestCase, ZephyrError> {
        self.client.test_case(key).await
    }

    async fn folder(&self, id: i64) -> Result<Folder, ZephyrError> {
        self.client.folder(id).await
    }
}
