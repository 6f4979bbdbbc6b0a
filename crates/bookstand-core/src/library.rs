// ── Library application context ──
//
// Owns the gateway client, the data store, and the overlay. Every mutator
// issues exactly one request and, on success, refetches the whole library
// (refetch-on-mutate). On failure the store is left as it was, a warning is
// logged, and a generic error overlay is shown.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use bookstand_api::Client;
use bookstand_api::models::{BookPayload, ProfilePayload};

use crate::config::LibraryConfig;
use crate::convert;
use crate::error::CoreError;
use crate::model::{Book, EntityId, ReadingStatus, Snapshot, Theme};
use crate::notify::{ConfirmAction, Notifier};
use crate::store::DataStore;

const ERROR_TITLE: &str = "Error";
const LOAD_FAILED: &str = "Could not load the library. Try reloading.";

// ── Mutation inputs ──────────────────────────────────────────────

/// Fields to create or update on a book. Unset fields are left alone by
/// the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookDraft {
    pub id: Option<EntityId>,
    pub status: Option<ReadingStatus>,
    pub rating: Option<f64>,
    pub feelings: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub media_type: Option<String>,
    pub total_pages: Option<u32>,
    pub total_time: Option<String>,
    pub review: Option<String>,
    pub synopsis: Option<String>,
    pub favorite: Option<bool>,
    pub cover_url: Option<String>,
    /// Replaces the book's full shelf set when present.
    pub shelves: Option<BTreeSet<EntityId>>,
}

impl BookDraft {
    pub fn for_book(id: impl Into<EntityId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Prefill every field from an existing book, as the edit form does.
    pub fn from_book(book: &Book) -> Self {
        let meta = &book.meta;
        Self {
            id: Some(book.id.clone()),
            status: Some(book.status),
            rating: meta.rating,
            feelings: Some(meta.feelings.clone()),
            start_date: meta.start_date.clone(),
            end_date: meta.end_date.clone(),
            media_type: meta.media_type.clone(),
            total_pages: meta.total_pages,
            total_time: meta.total_time.clone(),
            review: meta.review.clone(),
            synopsis: meta.synopsis.clone(),
            favorite: Some(meta.favorite),
            cover_url: book.cover_url.clone(),
            shelves: Some(book.shelves.clone()),
        }
    }
}

/// Profile fields to change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub theme: Option<Theme>,
    pub name: Option<String>,
}

// ── Library ──────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<LibraryInner>`.
#[derive(Clone)]
pub struct Library {
    inner: Arc<LibraryInner>,
}

struct LibraryInner {
    config: LibraryConfig,
    client: Client,
    store: DataStore,
    notifier: Notifier,
}

impl Library {
    /// Build the HTTP client from configuration. Does not fetch anything;
    /// call [`load()`](Self::load).
    pub fn new(config: LibraryConfig) -> Result<Self, CoreError> {
        let client = Client::new(config.url.clone(), &config.transport())?;
        Ok(Self::with_client(config, client))
    }

    /// Use an already-built gateway client.
    pub fn with_client(config: LibraryConfig, client: Client) -> Self {
        Self {
            inner: Arc::new(LibraryInner {
                config,
                client,
                store: DataStore::new(),
                notifier: Notifier::new(),
            }),
        }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &DataStore {
        &self.inner.store
    }

    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.store.snapshot()
    }

    // ── Loading ──────────────────────────────────────────────────

    /// Initial load with the loading overlay up.
    pub async fn load(&self) -> Result<(), CoreError> {
        self.notifier().loading("Loading your library...");
        match self.refresh().await {
            Ok(()) => {
                self.notifier().hide();
                let snap = self.snapshot();
                info!(
                    books = snap.books.len(),
                    shelves = snap.shelves.len(),
                    "library loaded"
                );
                Ok(())
            }
            Err(e) => Err(self.fail("load", LOAD_FAILED, e)),
        }
    }

    /// Fetch everything and replace the snapshot. Leaves the overlay alone.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let data = self
            .inner
            .client
            .fetch_data()
            .await
            .map_err(|e| self.lift(e))?;
        self.store()
            .replace(convert::snapshot_from_data(data, Utc::now()));
        Ok(())
    }

    // ── Books ────────────────────────────────────────────────────

    /// Create or update a book, returning the id the server stored it under.
    pub async fn save_book(&self, draft: BookDraft) -> Result<EntityId, CoreError> {
        let payload = BookPayload::from(&draft);
        let result = self.inner.client.save_book(&payload).await;
        let id = self
            .settle("save book", "Could not save the book.", result)
            .await?;
        Ok(id.into())
    }

    /// Open the confirmation overlay for removing a book. Nothing is sent.
    pub fn request_delete_book(&self, id: &EntityId) -> Result<ConfirmAction, CoreError> {
        let snap = self.snapshot();
        let book = snap.book(id).ok_or_else(|| CoreError::BookNotFound {
            identifier: id.to_string(),
        })?;
        let action = ConfirmAction::DeleteBook {
            id: book.id.clone(),
            title: book.title.clone(),
        };
        self.notifier().confirm(action.clone());
        Ok(action)
    }

    // ── Shelves ──────────────────────────────────────────────────

    /// Create a shelf. Blank names are rejected without a request.
    pub async fn create_shelf(&self, name: &str) -> Result<EntityId, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "shelf name must not be blank".into(),
            });
        }

        let result = self.inner.client.create_shelf(name, None).await;
        let id = self
            .settle("create shelf", "Could not create the shelf.", result)
            .await?;

        match id {
            Some(id) => Ok(id.into()),
            // Fall back to the refreshed snapshot when the server omits the id.
            None => self
                .snapshot()
                .shelves
                .iter()
                .find(|s| s.name == name)
                .map(|s| s.id.clone())
                .ok_or_else(|| CoreError::ShelfNotFound {
                    identifier: name.to_owned(),
                }),
        }
    }

    /// Open the confirmation overlay for deleting a shelf. Nothing is sent.
    pub fn request_delete_shelf(&self, id: &EntityId) -> Result<ConfirmAction, CoreError> {
        let snap = self.snapshot();
        let shelf = snap.shelf(id).ok_or_else(|| CoreError::ShelfNotFound {
            identifier: id.to_string(),
        })?;
        let action = ConfirmAction::DeleteShelf {
            id: shelf.id.clone(),
            name: shelf.name.clone(),
        };
        self.notifier().confirm(action.clone());
        Ok(action)
    }

    // ── Confirmation ─────────────────────────────────────────────

    /// Fire the pending destructive action.
    pub async fn confirm(&self) -> Result<ConfirmAction, CoreError> {
        let action = self
            .notifier()
            .take_confirm()
            .ok_or(CoreError::NothingToConfirm)?;
        debug!(?action, "confirmed");

        match &action {
            ConfirmAction::DeleteBook { id, .. } => {
                let result = self.inner.client.delete_book(&id.into()).await;
                self.settle("delete book", "Could not remove the book.", result)
                    .await?;
            }
            ConfirmAction::DeleteShelf { id, .. } => {
                let result = self.inner.client.delete_shelf(&id.into()).await;
                self.settle("delete shelf", "Could not delete the shelf.", result)
                    .await?;
            }
        }
        Ok(action)
    }

    /// Cancel the pending confirmation, if any.
    pub fn dismiss(&self) -> Option<ConfirmAction> {
        self.notifier().take_confirm()
    }

    // ── Profile ──────────────────────────────────────────────────

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<(), CoreError> {
        let payload = ProfilePayload::from(&update);
        let result = self.inner.client.update_profile(&payload).await;
        self.settle("update profile", "Could not save the profile.", result)
            .await?;
        self.notifier().success("Success", "Profile updated");
        Ok(())
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), CoreError> {
        self.update_profile(ProfileUpdate {
            theme: Some(theme),
            ..ProfileUpdate::default()
        })
        .await
    }

    /// Upload an image file as the new avatar, returning its URL.
    pub async fn upload_avatar(&self, path: &Path) -> Result<String, CoreError> {
        const FAILED: &str = "Could not upload the avatar.";

        let bytes = tokio::fs::read(path).await.map_err(|source| {
            self.fail(
                "read avatar",
                FAILED,
                CoreError::Io {
                    path: path.to_path_buf(),
                    source,
                },
            )
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "avatar".into(), |n| n.to_string_lossy().into_owned());

        let result = self.inner.client.upload_avatar(&file_name, bytes).await;
        let url = self.settle("upload avatar", FAILED, result).await?;
        self.notifier().success("Success", "Profile updated");
        Ok(url)
    }

    // ── Internals ────────────────────────────────────────────────

    /// Finish a mutation: refetch on success, report on failure.
    async fn settle<T>(
        &self,
        operation: &str,
        failure: &str,
        result: Result<T, bookstand_api::Error>,
    ) -> Result<T, CoreError> {
        let value = result.map_err(|e| self.fail(operation, failure, self.lift(e)))?;
        self.refresh()
            .await
            .map_err(|e| self.fail("refresh", LOAD_FAILED, e))?;
        Ok(value)
    }

    fn fail(&self, operation: &str, message: &str, err: CoreError) -> CoreError {
        warn!(operation, error = %err, "request failed");
        self.notifier().error(ERROR_TITLE, message);
        err
    }

    /// Convert a transport error, filling in the configured timeout.
    fn lift(&self, err: bookstand_api::Error) -> CoreError {
        match CoreError::from(err) {
            CoreError::Timeout { .. } => CoreError::Timeout {
                timeout_secs: self.inner.config.timeout.as_secs(),
            },
            other => other,
        }
    }
}
