//! Per-user session records and their storage.
//!
//! A session remembers what a user is doing (`SessionState`) and the last
//! panel message rendered for them, including the chat and forum topic it
//! was posted into. Records are keyed by Telegram user id.

pub mod error;
pub mod file_store;
pub mod record;
pub mod store;

pub use {
    error::{Error, Result},
    file_store::JsonFileSessionStore,
    record::{PanelMessage, SessionRecord, SessionState},
    store::{MemorySessionStore, SessionStore},
};
