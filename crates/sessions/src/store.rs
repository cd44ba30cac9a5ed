use std::collections::HashMap;

use {async_trait::async_trait, tgpanel_common::UserId, tokio::sync::RwLock, tracing::debug};

use crate::{
    error::Result,
    record::{PanelMessage, SessionRecord, SessionState},
};

/// Persistent storage for per-user session records.
///
/// Mutating calls create the record on first use, so callers never need a
/// separate "create" step.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user_id: UserId) -> Result<Option<SessionRecord>>;

    /// Insert or replace a whole record.
    async fn put(&self, record: SessionRecord) -> Result<()>;

    /// All records, ordered by user id.
    async fn list(&self) -> Result<Vec<SessionRecord>>;

    /// Remember a rendered panel for `user_id` and return the updated record.
    async fn record_panel(&self, user_id: UserId, panel: PanelMessage) -> Result<SessionRecord>;

    /// Change the interaction state for `user_id` and return the updated record.
    async fn set_state(&self, user_id: UserId, state: SessionState) -> Result<SessionRecord>;
}

/// In-process store, used by tests and single-instance deployments.
#[derive(Default)]
pub struct MemorySessionStore {
    records: RwLock<HashMap<UserId, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn modify(
        &self,
        user_id: UserId,
        f: impl FnOnce(&mut SessionRecord),
    ) -> SessionRecord {
        let mut records = self.records.write().await;
        let record = records
            .entry(user_id)
            .or_insert_with(|| SessionRecord::new(user_id));
        f(record);
        record.clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, user_id: UserId) -> Result<Option<SessionRecord>> {
        Ok(self.records.read().await.get(&user_id).cloned())
    }

    async fn put(&self, record: SessionRecord) -> Result<()> {
        self.records.write().await.insert(record.user_id, record);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SessionRecord>> {
        let mut records: Vec<_> = self.records.read().await.values().cloned().collect();
        records.sort_by_key(|r| r.user_id);
        Ok(records)
    }

    async fn record_panel(&self, user_id: UserId, panel: PanelMessage) -> Result<SessionRecord> {
        debug!(
            %user_id,
            chat_id = %panel.chat_id,
            message_id = %panel.message_id,
            panel_id = %panel.panel_id,
            "recording panel"
        );
        Ok(self.modify(user_id, |r| r.record_panel(panel)).await)
    }

    async fn set_state(&self, user_id: UserId, state: SessionState) -> Result<SessionRecord> {
        debug!(%user_id, ?state, "setting session state");
        Ok(self.modify(user_id, |r| r.set_state(state)).await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use {
        super::*,
        tgpanel_common::{ChatId, MessageId, ThreadId},
    };

    fn panel(chat: i64) -> PanelMessage {
        PanelMessage {
            chat_id: ChatId(chat),
            message_id: MessageId(50),
            panel_id: "main".into(),
            message_thread_id: Some(ThreadId(77)),
        }
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = MemorySessionStore::new();
        assert!(store.get(UserId(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_record_panel_creates_session() {
        let store = MemorySessionStore::new();
        let record = store.record_panel(UserId(1), panel(123)).await.unwrap();
        assert_eq!(record.state.panel_id(), Some("main"));

        let stored = store.get(UserId(1)).await.unwrap().unwrap();
        assert_eq!(stored.panel, Some(panel(123)));
    }

    #[tokio::test]
    async fn test_set_state_keeps_panel() {
        let store = MemorySessionStore::new();
        store.record_panel(UserId(1), panel(123)).await.unwrap();
        let record = store
            .set_state(UserId(1), SessionState::Idle)
            .await
            .unwrap();
        assert_eq!(record.state, SessionState::Idle);
        assert_eq!(record.panel, Some(panel(123)));
    }

    #[tokio::test]
    async fn test_list_sorted() {
        let store = MemorySessionStore::new();
        store.put(SessionRecord::new(UserId(3))).await.unwrap();
        store.put(SessionRecord::new(UserId(1))).await.unwrap();
        let ids: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.user_id)
            .collect();
        assert_eq!(ids, vec![UserId(1), UserId(3)]);
    }
}
