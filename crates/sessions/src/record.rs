use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    tgpanel_common::{ChatId, MessageId, ThreadId, UserId},
};

/// What the user is currently doing with the bot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SessionState {
    /// No interaction in progress.
    #[default]
    Idle,
    /// A control panel is active.
    Panel { panel_id: String },
    /// A panel asked for free-form input and is waiting for the next message.
    AwaitingInput { panel_id: String, field: String },
}

impl SessionState {
    /// The panel this state refers to, if any.
    pub fn panel_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Panel { panel_id } | Self::AwaitingInput { panel_id, .. } => Some(panel_id),
        }
    }
}

/// The last panel message rendered for a user.
///
/// A panel belongs to the chat it was posted in. Showing it somewhere else
/// means rendering a new message and replacing this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelMessage {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub panel_id: String,
    /// Forum topic of the panel message; `None` in chats without topics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<ThreadId>,
}

/// Last known interaction state for a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub user_id: UserId,
    pub state: SessionState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel: Option<PanelMessage>,
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    /// A fresh, idle session for a user's first interaction.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            state: SessionState::Idle,
            panel: None,
            updated_at: Utc::now(),
        }
    }

    /// Remember a freshly rendered panel and make it the active state.
    pub fn record_panel(&mut self, panel: PanelMessage) {
        self.state = SessionState::Panel {
            panel_id: panel.panel_id.clone(),
        };
        self.panel = Some(panel);
        self.touch();
    }

    pub fn set_state(&mut self, state: SessionState) {
        self.state = state;
        self.touch();
    }

    /// The remembered panel, but only when it lives in `chat_id`.
    pub fn panel_in_chat(&self, chat_id: ChatId) -> Option<&PanelMessage> {
        self.panel.as_ref().filter(|panel| panel.chat_id == chat_id)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
