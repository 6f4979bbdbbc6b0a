// Bookshelf API HTTP client
//
// Wraps `reqwest::Client` with base-URL resolution and `{status, message}`
// envelope unwrapping. Endpoint modules (data, books, shelves, profile) are
// implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use reqwest::multipart::Form;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{Envelope, STATUS_SUCCESS};
use crate::transport::TransportConfig;

/// Raw HTTP client for the bookshelf API.
///
/// All paths are resolved relative to the base URL, so a server mounted
/// under a prefix (e.g. `https://host/bookshelf/api/`) works unchanged.
/// Every method returns the payload with the envelope already checked.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Create a new client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = with_trailing_slash(base_url);
        let http = transport.build_client(&base_url)?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: with_trailing_slash(base_url),
        }
    }

    /// Parse `base_url` and wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let url = Url::parse(base_url)?;
        Ok(Self::with_client(http, url))
    }

    /// The API base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        parse_envelope(resp).await
    }

    /// Send a POST request with a JSON body and unwrap the envelope.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_envelope(resp).await
    }

    /// Send a multipart POST and unwrap the envelope.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {} (multipart)", url);

        let resp = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_envelope(resp).await
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Check HTTP status and the `{status, message}` envelope, then decode the
/// remaining fields into `T`.
async fn parse_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let landed_on_login = resp.url().path().contains("/login");

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(Error::Authentication {
            status: status.as_u16(),
        });
    }

    let body = resp.text().await.map_err(Error::Transport)?;
    trace!(status = status.as_u16(), body_len = body.len(), "response received");

    if !status.is_success() {
        let message = serde_json::from_str::<Envelope>(&body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_owned());
        return Err(Error::Http {
            status: status.as_u16(),
            message,
        });
    }

    let value: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        // Session-protected routes redirect to an HTML login page.
        Err(_) if landed_on_login => {
            return Err(Error::Authentication {
                status: status.as_u16(),
            });
        }
        Err(e) => {
            return Err(Error::Deserialization {
                message: e.to_string(),
                body,
            });
        }
    };

    let envelope: Envelope =
        serde_json::from_value(value.clone()).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.clone(),
        })?;

    if envelope.status != STATUS_SUCCESS {
        return Err(Error::Api {
            message: envelope
                .message
                .unwrap_or_else(|| format!("status={}", envelope.status)),
        });
    }

    serde_json::from_value(value).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = Url::parse("https://host/bookshelf/api").unwrap_or_else(|_| unreachable!());
        let fixed = with_trailing_slash(url);
        assert_eq!(fixed.as_str(), "https://host/bookshelf/api/");
    }

    #[test]
    fn paths_resolve_under_prefix() {
        let client = Client::from_reqwest("https://host/bookshelf/api", reqwest::Client::new());
        let url = client.and_then(|c| c.url("/book/delete"));
        assert_eq!(
            url.map(|u| u.to_string()).ok().as_deref(),
            Some("https://host/bookshelf/api/book/delete")
        );
    }
}
