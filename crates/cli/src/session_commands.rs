//! CLI subcommands for inspecting stored sessions.

use {
    anyhow::{Result, anyhow},
    clap::Subcommand,
    tgpanel_common::{ChatId, ThreadId, UserId},
    tgpanel_config::TelegramConfig,
    tgpanel_sessions::{SessionRecord, SessionStore},
    tgpanel_telegram::PanelEvent,
};

#[derive(Subcommand)]
pub enum SessionAction {
    /// List all stored sessions.
    List,
    /// Print one session as JSON.
    Show { user: UserId },
}

pub async fn handle_sessions(store: &dyn SessionStore, action: SessionAction) -> Result<()> {
    match action {
        SessionAction::List => {
            let records = store.list().await?;
            if records.is_empty() {
                println!("No sessions found.");
            }
            for record in &records {
                println!("{}", summary_line(record));
            }
        },
        SessionAction::Show { user } => {
            let record = store
                .get(user)
                .await?
                .ok_or_else(|| anyhow!("no session for user {user}"))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        },
    }
    Ok(())
}

/// Resolve the reply topic for `user` in `chat` the way the dispatcher would.
pub async fn resolve_thread(
    store: &dyn SessionStore,
    telegram: &TelegramConfig,
    user: UserId,
    chat: ChatId,
    thread: Option<ThreadId>,
) -> Result<Option<ThreadId>> {
    let session = store.get(user).await?;
    let event = PanelEvent::new(chat).with_user(user).with_thread(thread);
    Ok(event.reply_thread(telegram, session.as_ref()))
}

fn summary_line(record: &SessionRecord) -> String {
    let state = match record.state.panel_id() {
        Some(panel_id) => panel_id.to_string(),
        None => "idle".to_string(),
    };
    let panel = match &record.panel {
        Some(p) => match p.message_thread_id {
            Some(thread) => format!("chat {} msg {} topic {thread}", p.chat_id, p.message_id),
            None => format!("chat {} msg {}", p.chat_id, p.message_id),
        },
        None => "no panel".to_string(),
    };
    format!(
        "  {:<12} {:<12} {:<32} {}",
        record.user_id,
        state,
        panel,
        record.updated_at.to_rfc3339()
    )
}
