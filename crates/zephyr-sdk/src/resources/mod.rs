//! Resource endpoints.
//!
//! Listing endpoints return a [`ListRequest`] builder; its filter setters
//! only exist for resources the API accepts them on. Single-resource reads
//! are generic over the decoded type so callers can pick a typed struct or
//! keep the raw `serde_json::Value`.

mod folders;
mod issue_links;
mod settings;
mod test_cases;
mod test_cycles;
mod test_executions;
mod test_plans;

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::client::Client;
use crate::error::ZephyrError;
use crate::pagination::Page;
use crate::types::{
    Environment, Folder, FolderType, Priority, Status, StatusType, TestCase, TestCycle,
    TestExecution, TestPlan,
};

/// Lists that accept a `projectKey` filter.
pub trait ProjectScoped {}

/// Lists that accept a `folderId` filter.
pub trait FolderScoped {}

impl ProjectScoped for Folder {}
impl ProjectScoped for TestCase {}
impl ProjectScoped for TestCycle {}
impl ProjectScoped for TestPlan {}
impl ProjectScoped for TestExecution {}
impl ProjectScoped for Environment {}
impl ProjectScoped for Priority {}
impl ProjectScoped for Status {}

impl FolderScoped for TestCase {}
impl FolderScoped for TestCycle {}
impl FolderScoped for TestPlan {}

/// Builder for one page of a listing.
///
/// ```no_run
/// # async fn run(client: &zephyr_sdk::Client) -> Result<(), zephyr_sdk::ZephyrError> {
/// let page = client
///     .test_cases()
///     .project_key("PROJ")
///     .folder_id(42)
///     .max_results(50)
///     .send()
///     .await?;
/// # let _ = page;
/// # Ok(())
/// # }
/// ```
#[must_use]
pub struct ListRequest<'a, T> {
    client: &'a Client,
    path: Vec<String>,
    params: Vec<(&'static str, String)>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ListRequest<'_, T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client,
            path: self.path.clone(),
            params: self.params.clone(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T> ListRequest<'a, T> {
    pub(crate) fn new(client: &'a Client, path: &[&str]) -> Self {
        Self {
            client,
            path: path.iter().map(|s| s.to_string()).collect(),
            params: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Set a query parameter, replacing an earlier value for the same key.
    fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.retain(|(k, _)| *k != key);
        self.params.push((key, value.to_string()));
        self
    }

    pub fn max_results(self, n: u32) -> Self {
        self.param("maxResults", n)
    }

    pub fn start_at(self, n: u32) -> Self {
        self.param("startAt", n)
    }

    /// Query parameters in the order they will be sent.
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }
}

impl<T: DeserializeOwned> ListRequest<'_, T> {
    pub async fn send(self) -> Result<Page<T>, ZephyrError> {
        let segments: Vec<&str> = self.path.iter().map(String::as_str).collect();
        self.client.get(&segments, &self.params).await
    }
}

impl<T: ProjectScoped> ListRequest<'_, T> {
    pub fn project_key(self, key: impl Into<String>) -> Self {
        self.param("projectKey", key.into())
    }
}

impl<T: FolderScoped> ListRequest<'_, T> {
    pub fn folder_id(self, id: i64) -> Self {
        self.param("folderId", id)
    }
}

impl ListRequest<'_, Folder> {
    pub fn folder_type(self, folder_type: FolderType) -> Self {
        self.param("folderType", folder_type)
    }
}

impl ListRequest<'_, Status> {
    pub fn status_type(self, status_type: StatusType) -> Self {
        self.param("statusType", status_type)
    }
}

impl ListRequest<'_, TestExecution> {
    pub fn test_cycle(self, key: impl Into<String>) -> Self {
        self.param("testCycle", key.into())
    }

    pub fn test_case(self, key: impl Into<String>) -> Self {
        self.param("testCase", key.into())
    }

    pub fn actual_end_date_after(self, date: impl Into<String>) -> Self {
        self.param("actualEndDateAfter", date.into())
    }

    pub fn actual_end_date_before(self, date: impl Into<String>) -> Self {
        self.param("actualEndDateBefore", date.into())
    }

    pub fn only_last_executions(self, only_last: bool) -> Self {
        self.param("onlyLastExecutions", only_last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_replace_earlier_values() {
        let client = Client::from_token("t").unwrap();
        let request = client
            .folders()
            .max_results(10)
            .project_key("A")
            .max_results(100)
            .project_key("B");
        assert_eq!(
            request.params(),
            &[
                ("maxResults", "100".to_string()),
                ("projectKey", "B".to_string())
            ]
        );
    }

    #[test]
    fn typed_filters_render_wire_values() {
        let client = Client::from_token("t").unwrap();
        let request = client
            .statuses()
            .status_type(StatusType::TestExecution)
            .start_at(20);
        assert_eq!(
            request.params(),
            &[
                ("statusType", "TEST_EXECUTION".to_string()),
                ("startAt", "20".to_string())
            ]
        );

        let request = client.test_executions().only_last_executions(true);
        assert_eq!(
            request.params(),
            &[("onlyLastExecutions", "true".to_string())]
        );
    }
}
