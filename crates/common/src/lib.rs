//! Shared identifier types and error definitions used across all tgpanel crates.

pub mod error;
pub mod types;

pub use {
    error::{Error, FromMessage, Result},
    types::{ChatId, MessageId, ThreadId, UserId},
};
