// Shelf endpoints

use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::models::{MutationResponse, RecordId, ShelfRequest};

impl Client {
    /// Create a shelf, returning its id when the server reports one.
    ///
    /// `POST shelf` with `{"action": "create", "name": ...}`
    pub async fn create_shelf(
        &self,
        name: &str,
        is_public: Option<bool>,
    ) -> Result<Option<RecordId>, Error> {
        debug!(name, "creating shelf");
        let body = ShelfRequest::Create {
            name: name.to_owned(),
            is_public,
        };
        let resp: MutationResponse = self.post("shelf", &body).await?;
        Ok(resp.id)
    }

    /// Delete a shelf. Books on it keep their reading data.
    ///
    /// `POST shelf` with `{"action": "delete", "id": ...}`
    pub async fn delete_shelf(&self, id: &RecordId) -> Result<(), Error> {
        debug!(%id, "deleting shelf");
        let body = ShelfRequest::Delete { id: id.clone() };
        let _: MutationResponse = self.post("shelf", &body).await?;
        Ok(())
    }
}
