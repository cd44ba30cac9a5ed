use {
    teloxide::types::Message,
    tgpanel_common::{ChatId, ThreadId, UserId},
    tgpanel_config::TelegramConfig,
    tgpanel_sessions::SessionRecord,
};

use crate::thread::resolve_panel_thread_id;

/// Where an incoming interaction happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelEvent {
    pub chat_id: ChatId,
    /// Sender; absent for anonymous admins and channel posts.
    pub user_id: Option<UserId>,
    /// Forum topic the event was posted in, if the chat has topics.
    pub thread_id: Option<ThreadId>,
}

impl PanelEvent {
    pub fn new(chat_id: ChatId) -> Self {
        Self {
            chat_id,
            user_id: None,
            thread_id: None,
        }
    }

    #[must_use]
    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    #[must_use]
    pub fn with_thread(mut self, thread_id: Option<ThreadId>) -> Self {
        self.thread_id = thread_id;
        self
    }

    /// Extract chat, sender and topic from an incoming message.
    ///
    /// Telegram also sets `message_thread_id` on plain reply chains in
    /// non-forum groups; only real topic messages count as an explicit thread.
    pub fn from_message(msg: &Message) -> Self {
        let user_id = msg
            .from
            .as_ref()
            .and_then(|u| i64::try_from(u.id.0).ok())
            .map(UserId);
        let thread_id = msg
            .thread_id
            .filter(|_| msg.is_topic_message)
            .map(|t| ThreadId(t.0.0));

        Self {
            chat_id: ChatId(msg.chat.id.0),
            user_id,
            thread_id,
        }
    }

    /// Thread for a reply to this event, given the sender's stored session.
    pub fn resolve_thread(&self, session: Option<&SessionRecord>) -> Option<ThreadId> {
        resolve_panel_thread_id(session, self.chat_id, self.thread_id)
    }

    /// Thread a dispatched reply uses under `config`.
    ///
    /// With `reuse_panel_topic` off the session is ignored, so only the
    /// event's own topic is honoured.
    pub fn reply_thread(
        &self,
        config: &TelegramConfig,
        session: Option<&SessionRecord>,
    ) -> Option<ThreadId> {
        self.resolve_thread(session.filter(|_| config.reuse_panel_topic))
    }
}
