use serde::de::DeserializeOwned;

use super::ListRequest;
use crate::client::Client;
use crate::error::ZephyrError;
use crate::inputs::FolderCreateInput;
use crate::types::{CreatedResource, Folder};

impl Client {
    /// `GET /folders`.
    pub fn folders(&self) -> ListRequest<'_, Folder> {
        ListRequest::new(self, &["folders"])
    }

    /// `GET /folders/{id}`.
    pub async fn folder<T: DeserializeOwned>(&self, id: i64) -> Result<T, ZephyrError> {
        self.get(&["folders", &id.to_string()], &[]).await
    }

    /// `POST /folders`.
    pub async fn create_folder(
        &self,
        input: &FolderCreateInput,
    ) -> Result<CreatedResource, ZephyrError> {
        self.post(&["folders"], input).await
    }
}
