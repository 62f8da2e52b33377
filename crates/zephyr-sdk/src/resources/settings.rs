//! Project-level settings: projects, environments, priorities and statuses.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ListRequest;
use crate::client::Client;
use crate::error::ZephyrError;
use crate::inputs::{EnvironmentCreateInput, PriorityCreateInput, StatusCreateInput};
use crate::types::{CreatedResource, Environment, Priority, Project, Status};

impl Client {
    // ── Projects ─────────────────────────────────────────────────────────────

    /// `GET /projects`.
    pub fn projects(&self) -> ListRequest<'_, Project> {
        ListRequest::new(self, &["projects"])
    }

    /// `GET /projects/{idOrKey}`.
    pub async fn project<T: DeserializeOwned>(&self, id_or_key: &str) -> Result<T, ZephyrError> {
        self.get(&["projects", id_or_key], &[]).await
    }

    // ── Environments ─────────────────────────────────────────────────────────

    /// `GET /environments`.
    pub fn environments(&self) -> ListRequest<'_, Environment> {
        ListRequest::new(self, &["environments"])
    }

    /// `GET /environments/{id}`.
    pub async fn environment<T: DeserializeOwned>(&self, id: i64) -> Result<T, ZephyrError> {
        self.get(&["environments", &id.to_string()], &[]).await
    }

    /// `POST /environments`.
    pub async fn create_environment(
        &self,
        input: &EnvironmentCreateInput,
    ) -> Result<CreatedResource, ZephyrError> {
        self.post(&["environments"], input).await
    }

    /// `PUT /environments/{id}` with a full representation.
    pub async fn update_environment<B: Serialize + ?Sized>(
        &self,
        id: i64,
        body: &B,
    ) -> Result<(), ZephyrError> {
        self.put(&["environments", &id.to_string()], body).await
    }

    // ── Priorities ───────────────────────────────────────────────────────────

    /// `GET /priorities`.
    pub fn priorities(&self) -> ListRequest<'_, Priority> {
        ListRequest::new(self, &["priorities"])
    }

    /// `GET /priorities/{id}`.
    pub async fn priority<T: DeserializeOwned>(&self, id: i64) -> Result<T, ZephyrError> {
        self.get(&["priorities", &id.to_string()], &[]).await
    }

    /// `POST /priorities`.
    pub async fn create_priority(
        &self,
        input: &PriorityCreateInput,
    ) -> Result<CreatedResource, ZephyrError> {
        self.post(&["priorities"], input).await
    }

    // ── Statuses ─────────────────────────────────────────────────────────────

    /// `GET /statuses`.
    pub fn statuses(&self) -> ListRequest<'_, Status> {
        ListRequest::new(self, &["statuses"])
    }

    /// `GET /statuses/{id}`.
    pub async fn status<T: DeserializeOwned>(&self, id: i64) -> Result<T, ZephyrError> {
        self.get(&["statuses", &id.to_string()], &[]).await
    }

    /// `POST /statuses`.
    pub async fn create_status(
        &self,
        input: &StatusCreateInput,
    ) -> Result<CreatedResource, ZephyrError> {
        self.post(&["statuses"], input).await
    }
}
