// Library snapshot endpoint

use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::models::DataResponse;

impl Client {
    /// Fetch the full library: books, per-book progress, shelves, and the
    /// user's profile settings.
    ///
    /// `GET data`
    pub async fn fetch_data(&self) -> Result<DataResponse, Error> {
        let data: DataResponse = self.get("data").await?;
        debug!(
            books = data.books.len(),
            progress = data.progress.len(),
            shelves = data.shelves.len(),
            "library data fetched"
        );
        Ok(data)
    }
}
