use serde::de::DeserializeOwned;

use super::ListRequest;
use crate::client::Client;
use crate::error::ZephyrError;
use crate::inputs::{TestExecutionCreateInput, TestExecutionUpdateInput};
use crate::types::{KeyedCreatedResource, TestExecution};

impl Client {
    /// `GET /testexecutions`.
    pub fn test_executions(&self) -> ListRequest<'_, TestExecution> {
        ListRequest::new(self, &["testexecutions"])
    }

    /// `GET /testexecutions/{idOrKey}`.
    pub async fn test_execution<T: DeserializeOwned>(
        &self,
        id_or_key: &str,
    ) -> Result<T, ZephyrError> {
        self.get(&["testexecutions", id_or_key], &[]).await
    }

    /// `POST /testexecutions`.
    pub async fn create_test_execution(
        &self,
        input: &TestExecutionCreateInput,
    ) -> Result<KeyedCreatedResource, ZephyrError> {
        self.post(&["testexecutions"], input).await
    }

    /// `PUT /testexecutions/{idOrKey}`; only the fields set in `input` change.
    pub async fn update_test_execution(
        &self,
        id_or_key: &str,
        input: &TestExecutionUpdateInput,
    ) -> Result<(), ZephyrError> {
        self.put(&["testexecutions", id_or_key], input).await
    }
}
