use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ListRequest;
use crate::client::Client;
use crate::error::ZephyrError;
use crate::inputs::{TestCaseCreateInput, TestStepsInput};
use crate::types::{CreatedResource, KeyedCreatedResource, TestCase, TestStep};

impl Client {
    /// `GET /testcases`.
    pub fn test_cases(&self) -> ListRequest<'_, TestCase> {
        ListRequest::new(self, &["testcases"])
    }

    /// `GET /testcases/{key}`.
    pub async fn test_case<T: DeserializeOwned>(&self, key: &str) -> Result<T, ZephyrError> {
        self.get(&["testcases", key], &[]).await
    }

    /// `POST /testcases`.
    pub async fn create_test_case(
        &self,
        input: &TestCaseCreateInput,
    ) -> Result<KeyedCreatedResource, ZephyrError> {
        self.post(&["testcases"], input).await
    }

    /// `PUT /testcases/{key}`. The API replaces the whole test case, so
    /// `body` should be a full representation.
    pub async fn update_test_case<B: Serialize + ?Sized>(
        &self,
        key: &str,
        body: &B,
    ) -> Result<(), ZephyrError> {
        self.put(&["testcases", key], body).await
    }

    /// `GET /testcases/{key}/teststeps`.
    pub fn test_steps(&self, test_case_key: &str) -> ListRequest<'_, TestStep> {
        ListRequest::new(self, &["testcases", test_case_key, "teststeps"])
    }

    /// `POST /testcases/{key}/teststeps`.
    pub async fn create_test_steps(
        &self,
        test_case_key: &str,
        input: &TestStepsInput,
    ) -> Result<CreatedResource, ZephyrError> {
        self.post(&["testcases", test_case_key, "teststeps"], input)
            .await
    }
}
