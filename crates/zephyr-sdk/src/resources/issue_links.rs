//! Zephyr resources linked to a Jira issue.
//!
//! These endpoints answer with a bare JSON array, not a page.

use crate::client::Client;
use crate::error::ZephyrError;
use crate::types::{EntityRef, TestCaseLink};

impl Client {
    /// `GET /issuelinks/{issueKey}/testcases`.
    pub async fn issue_link_test_cases(
        &self,
        issue_key: &str,
    ) -> Result<Vec<TestCaseLink>, ZephyrError> {
        self.get(&["issuelinks", issue_key, "testcases"], &[]).await
    }

    /// `GET /issuelinks/{issueKey}/testcycles`.
    pub async fn issue_link_test_cycles(
        &self,
        issue_key: &str,
    ) -> Result<Vec<EntityRef>, ZephyrError> {
        self.get(&["issuelinks", issue_key, "testcycles"], &[]).await
    }

    /// `GET /issuelinks/{issueKey}/testplans`.
    pub async fn issue_link_test_plans(
        &self,
        issue_key: &str,
    ) -> Result<Vec<EntityRef>, ZephyrError> {
        self.get(&["issuelinks", issue_key, "testplans"], &[]).await
    }

    /// `GET /issuelinks/{issueKey}/executions`.
    pub async fn issue_link_executions(
        &self,
        issue_key: &str,
    ) -> Result<Vec<EntityRef>, ZephyrError> {
        self.get(&["issuelinks", issue_key, "executions"], &[]).await
    }
}
