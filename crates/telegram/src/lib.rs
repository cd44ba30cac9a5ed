//! Telegram side of the control panel.
//!
//! Decides which forum topic a panel reply belongs to and sends replies and
//! panel messages through the Bot API using teloxide.

pub mod error;
pub mod event;
pub mod outbound;
pub mod thread;

pub use {
    error::{Error, Result},
    event::PanelEvent,
    outbound::PanelOutbound,
    thread::resolve_panel_thread_id,
};
