// Integration tests for `Library` against a wiremock bookshelf server.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bookstand_core::{
    BookDraft, ConfirmAction, CoreError, EntityId, Library, LibraryConfig, OverlayLevel,
    ReadingStatus, Theme,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Library) {
    let server = MockServer::start().await;
    let config = LibraryConfig::new(server.uri().parse().unwrap());
    let library = Library::new(config).unwrap();
    (server, library)
}

fn library_json(shelves: &Value) -> Value {
    json!({
        "status": "success",
        "books": [
            { "id": 1, "title": "Dune", "author": "Herbert", "shelves": [10] },
            { "id": 2, "title": "Emma", "author": "Austen" }
        ],
        "progress": {
            "1": { "percent": 0.5 },
            "2": { "percent": 1.0, "data": { "shelves": [10] } }
        },
        "shelves": shelves,
        "user": { "theme": "dark", "name": "reader" }
    })
}

async fn mount_data(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": "success" }))
}

// ── Load ────────────────────────────────────────────────────────────

#[tokio::test]
async fn load_populates_store_and_hides_overlay() {
    let (server, library) = setup().await;
    mount_data(&server, library_json(&json!([{ "id": 10, "name": "Classics" }]))).await;

    library.load().await.unwrap();

    let snap = library.snapshot();
    assert_eq!(snap.books.len(), 2);
    assert_eq!(snap.books[0].status, ReadingStatus::Reading);
    assert_eq!(snap.books[1].status, ReadingStatus::Finished);
    assert_eq!(snap.shelf_book_count(&EntityId::Numeric(10)), 2);
    assert!(library.store().last_refresh().is_some());
    assert!(library.notifier().current().is_none());
}

#[tokio::test]
async fn load_failure_shows_error_and_keeps_empty_store() {
    let (server, library) = setup().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "error", "message": "db locked"
        })))
        .mount(&server)
        .await;

    let result = library.load().await;

    assert!(matches!(result, Err(CoreError::Api { status: Some(500), .. })));
    let overlay = library.notifier().current().unwrap();
    assert_eq!(overlay.level, OverlayLevel::Error);
    assert!(library.snapshot().books.is_empty());
}

// ── Refetch-on-mutate ───────────────────────────────────────────────

#[tokio::test]
async fn save_book_refetches_library() {
    let (server, library) = setup().await;

    Mock::given(method("POST"))
        .and(path("/book"))
        .and(body_json(json!({ "id": 2, "status": "lendo" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success", "id": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(library_json(&json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let draft = BookDraft {
        status: Some(ReadingStatus::Reading),
        ..BookDraft::for_book(2)
    };
    let id = library.save_book(draft).await.unwrap();

    assert_eq!(id, EntityId::Numeric(2));
    assert_eq!(library.snapshot().books.len(), 2);
}

#[tokio::test]
async fn failed_mutation_leaves_state_untouched() {
    let (server, library) = setup().await;
    mount_data(&server, library_json(&json!([]))).await;
    library.load().await.unwrap();
    let before = library.snapshot();

    Mock::given(method("POST"))
        .and(path("/book"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error", "message": "Book not found"
        })))
        .mount(&server)
        .await;

    let result = library.save_book(BookDraft::for_book(99)).await;

    assert!(matches!(result, Err(CoreError::Rejected { .. })));
    assert_eq!(*library.snapshot(), *before);
    let overlay = library.notifier().current().unwrap();
    assert_eq!(overlay.level, OverlayLevel::Error);
    assert_eq!(overlay.body, "Could not save the book.");

    // Only the initial load hit /data.
    let fetches = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/data")
        .count();
    assert_eq!(fetches, 1);
}

#[tokio::test]
async fn blank_shelf_name_sends_nothing() {
    let (server, library) = setup().await;

    let result = library.create_shelf("   ").await;

    assert!(matches!(result, Err(CoreError::ValidationFailed { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_shelf_uses_refreshed_snapshot_when_id_missing() {
    let (server, library) = setup().await;

    Mock::given(method("POST"))
        .and(path("/shelf"))
        .and(body_json(json!({ "action": "create", "name": "Poetry" })))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    mount_data(&server, library_json(&json!([{ "id": 33, "name": "Poetry" }]))).await;

    let id = library.create_shelf(" Poetry ").await.unwrap();
    assert_eq!(id, EntityId::Numeric(33));
}

// ── Confirmation gating ─────────────────────────────────────────────

#[tokio::test]
async fn delete_waits_for_confirmation() {
    let (server, library) = setup().await;
    mount_data(&server, library_json(&json!([]))).await;
    library.load().await.unwrap();

    Mock::given(method("POST"))
        .and(path("/book/delete"))
        .and(body_json(json!({ "id": 1 })))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let action = library.request_delete_book(&EntityId::Numeric(1)).unwrap();
    assert!(matches!(action, ConfirmAction::DeleteBook { ref title, .. } if title == "Dune"));

    let posted = |reqs: &[wiremock::Request]| reqs.iter().filter(|r| r.method.as_str() == "POST").count();
    assert_eq!(posted(&server.received_requests().await.unwrap()), 0);

    library.confirm().await.unwrap();
    assert_eq!(posted(&server.received_requests().await.unwrap()), 1);
}

#[tokio::test]
async fn dismissed_confirmation_never_fires() {
    let (server, library) = setup().await;
    mount_data(&server, library_json(&json!([{ "id": 10, "name": "Classics" }]))).await;
    library.load().await.unwrap();

    library.request_delete_shelf(&EntityId::Numeric(10)).unwrap();
    assert!(library.dismiss().is_some());

    let result = library.confirm().await;
    assert!(matches!(result, Err(CoreError::NothingToConfirm)));
    let posts = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "POST")
        .count();
    assert_eq!(posts, 0);
}

#[tokio::test]
async fn deleting_shelf_keeps_member_statuses() {
    let (server, library) = setup().await;

    // First fetch has the shelf, later fetches don't.
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(library_json(&json!([{ "id": 10, "name": "Classics" }]))),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    library.load().await.unwrap();
    let statuses: Vec<ReadingStatus> = library.snapshot().books.iter().map(|b| b.status).collect();

    server.reset().await;
    mount_data(&server, library_json(&json!([]))).await;
    Mock::given(method("POST"))
        .and(path("/shelf"))
        .and(body_json(json!({ "action": "delete", "id": 10 })))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    library.request_delete_shelf(&EntityId::Numeric(10)).unwrap();
    library.confirm().await.unwrap();

    let snap = library.snapshot();
    assert!(snap.shelf(&EntityId::Numeric(10)).is_none());
    let after: Vec<ReadingStatus> = snap.books.iter().map(|b| b.status).collect();
    assert_eq!(after, statuses);
}

#[tokio::test]
async fn request_delete_unknown_book_is_not_found() {
    let (_server, library) = setup().await;
    let result = library.request_delete_book(&EntityId::Numeric(404));
    assert!(matches!(result, Err(CoreError::BookNotFound { .. })));
    assert!(library.notifier().current().is_none());
}

// ── Profile ─────────────────────────────────────────────────────────

#[tokio::test]
async fn set_theme_posts_and_reports_success() {
    let (server, library) = setup().await;

    Mock::given(method("POST"))
        .and(path("/profile"))
        .and(body_json(json!({ "theme": "light" })))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    let mut body = library_json(&json!([]));
    body["user"]["theme"] = json!("light");
    mount_data(&server, body).await;

    library.set_theme(Theme::Light).await.unwrap();

    assert_eq!(library.snapshot().profile.theme, Theme::Light);
    let overlay = library.notifier().current().unwrap();
    assert_eq!(overlay.level, OverlayLevel::Success);
    assert_eq!(overlay.body, "Profile updated");
}

#[tokio::test]
async fn upload_avatar_sends_file() {
    let (server, library) = setup().await;

    Mock::given(method("POST"))
        .and(path("/avatar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success", "avatar_url": "/static/avatars/u1.png"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_data(&server, library_json(&json!([]))).await;

    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(b"png bytes").unwrap();

    let url = library.upload_avatar(file.path()).await.unwrap();
    assert_eq!(url, "/static/avatars/u1.png");
}

#[tokio::test]
async fn upload_missing_file_is_io_error() {
    let (server, library) = setup().await;

    let result = library
        .upload_avatar(std::path::Path::new("/definitely/not/here.png"))
        .await;

    assert!(matches!(result, Err(CoreError::Io { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
    assert_eq!(
        library.notifier().current().map(|o| o.level),
        Some(OverlayLevel::Error)
    );
}
