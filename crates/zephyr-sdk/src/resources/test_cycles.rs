use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ListRequest;
use crate::client::Client;
use crate::error::ZephyrError;
use crate::inputs::TestCycleCreateInput;
use crate::types::{KeyedCreatedResource, TestCycle};

impl Client {
    /// `GET /testcycles`.
    pub fn test_cycles(&self) -> ListRequest<'_, TestCycle> {
        ListRequest::new(self, &["testcycles"])
    }

    /// `GET /testcycles/{idOrKey}`.
    pub async fn test_cycle<T: DeserializeOwned>(&self, id_or_key: &str) -> Result<T, ZephyrError> {
        self.get(&["testcycles", id_or_key], &[]).await
    }

    /// `POST /testcycles`.
    pub async fn create_test_cycle(
        &self,
        input: &TestCycleCreateInput,
    ) -> Result<KeyedCreatedResource, ZephyrError> {
        self.post(&["testcycles"], input).await
    }

    /// `PUT /testcycles/{idOrKey}` with a full representation.
    pub async fn update_test_cycle<B: Serialize + ?Sized>(
        &self,
        id_or_key: &str,
        body: &B,
    ) -> Result<(), ZephyrError> {
        self.put(&["testcycles", id_or_key], body).await
    }
}
