// Profile endpoints

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::models::{MutationResponse, ProfilePayload};

impl Client {
    /// Update profile settings (theme, display name).
    ///
    /// `POST profile`
    pub async fn update_profile(&self, payload: &ProfilePayload) -> Result<(), Error> {
        debug!(theme = ?payload.theme, "updating profile");
        let _: MutationResponse = self.post("profile", payload).await?;
        Ok(())
    }

    /// Upload a new avatar image, returning the URL it is served from.
    ///
    /// `POST avatar` as multipart with an `avatar` file field.
    pub async fn upload_avatar(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, Error> {
        debug!(file_name, size = bytes.len(), "uploading avatar");
        let part = Part::bytes(bytes).file_name(file_name.to_owned());
        let form = Form::new().part("avatar", part);

        let resp: MutationResponse = self.post_multipart("avatar", form).await?;
        resp.avatar_url
            .ok_or(Error::MissingField { field: "avatar_url" })
    }
}
