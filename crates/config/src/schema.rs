/// Config schema for the panel worker.
use std::path::PathBuf;

use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Root of `tgpanel.{toml,yaml,json}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TgPanelConfig {
    pub telegram: TelegramConfig,
    pub sessions: SessionsConfig,
    pub panels: PanelsConfig,
}

/// Telegram bot account settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token from @BotFather.
    #[serde(serialize_with = "serialize_secret")]
    pub token: Secret<String>,

    /// When an event carries no topic of its own, reply into the topic of
    /// the user's last panel in the same chat.
    pub reuse_panel_topic: bool,

    /// How many times a rate-limited request is retried after the
    /// server-provided `retry_after` delay.
    pub retry_after_max_retries: usize,
}

impl TelegramConfig {
    pub fn has_token(&self) -> bool {
        !self.token.expose_secret().trim().is_empty()
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"[REDACTED]")
            .field("reuse_panel_topic", &self.reuse_panel_topic)
            .field("retry_after_max_retries", &self.retry_after_max_retries)
            .finish()
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: Secret::new(String::new()),
            reuse_panel_topic: true,
            retry_after_max_retries: 4,
        }
    }
}

/// Where session records are persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    /// Session file; defaults to `<data_dir>/sessions.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl SessionsConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| crate::loader::data_dir().join("sessions.json"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelsConfig {
    /// Panel shown when a user opens the control panel without naming one.
    pub default_panel: String,
}

impl Default for PanelsConfig {
    fn default() -> Self {
        Self {
            default_panel: "main".into(),
        }
    }
}
