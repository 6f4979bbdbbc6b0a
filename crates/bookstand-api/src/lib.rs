// bookstand-api: Async Rust client for the bookshelf REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod books;
mod data;
mod lenient;
mod profile;
mod shelves;

pub use client::Client;
pub use error::Error;
pub use models::RecordId;
pub use transport::{TlsMode, TransportConfig};
