use serde::de::DeserializeOwned;

use super::ListRequest;
use crate::client::Client;
use crate::error::ZephyrError;
use crate::inputs::TestPlanCreateInput;
use crate::types::{KeyedCreatedResource, TestPlan};

impl Client {
    /// `GET /testplans`.
    pub fn test_plans(&self) -> ListRequest<'_, TestPlan> {
        ListRequest::new(self, &["testplans"])
    }

    /// `GET /testplans/{idOrKey}`.
    pub async fn test_plan<T: DeserializeOwned>(&self, id_or_key: &str) -> Result<T, ZephyrError> {
        self.get(&["testplans", id_or_key], &[]).await
    }

    /// `POST /testplans`.
    pub async fn create_test_plan(
        &self,
        input: &TestPlanCreateInput,
    ) -> Result<KeyedCreatedResource, ZephyrError> {
        self.post(&["testplans"], input).await
    }
}
