// Book endpoints
//
// Saving merges reading metadata and shelf membership into the server's
// per-user record. Deleting only forgets the user's reading data; the
// catalogue entry itself is never removed.

use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::models::{BookPayload, IdBody, MutationResponse, RecordId};

impl Client {
    /// Create or update a book's reading metadata.
    ///
    /// Returns the id the server stored the record under, falling back to
    /// the payload id when the response omits it.
    ///
    /// `POST book`
    pub async fn save_book(&self, payload: &BookPayload) -> Result<RecordId, Error> {
        debug!(id = ?payload.id, status = ?payload.status, "saving book");
        let resp: MutationResponse = self.post("book", payload).await?;
        resp.id
            .or_else(|| payload.id.clone())
            .ok_or(Error::MissingField { field: "id" })
    }

    /// Remove a book's reading data and shelf links for the current user.
    ///
    /// `POST book/delete` with `{"id": ...}`
    pub async fn delete_book(&self, id: &RecordId) -> Result<(), Error> {
        debug!(%id, "deleting book");
        let _: MutationResponse = self.post("book/delete", &IdBody { id }).await?;
        Ok(())
    }
}
