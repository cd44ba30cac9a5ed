use std::{
    collections::BTreeMap,
    fs::{self, File, OpenOptions},
    io::{Read, Write},
    path::{Path, PathBuf},
};

use {
    async_trait::async_trait,
    fd_lock::RwLock,
    tgpanel_common::UserId,
    tokio::sync::Mutex,
    tracing::debug,
};

use crate::{
    error::{Context, Error, Result},
    record::{PanelMessage, SessionRecord, SessionState},
    store::SessionStore,
};

type RecordMap = BTreeMap<UserId, SessionRecord>;

/// Single JSON file holding every session, keyed by user id.
///
/// Writers in this process are serialized by a mutex; an advisory file lock
/// keeps other processes (e.g. the CLI) from reading a half-written file.
pub struct JsonFileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<RecordMap> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_records(&path)).await?
    }

    async fn save(&self, records: RecordMap) -> Result<()> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_records(&path, &records)).await?
    }

    async fn modify(
        &self,
        user_id: UserId,
        f: impl FnOnce(&mut SessionRecord) + Send,
    ) -> Result<SessionRecord> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        let record = records
            .entry(user_id)
            .or_insert_with(|| SessionRecord::new(user_id));
        f(record);
        let updated = record.clone();
        self.save(records).await?;
        Ok(updated)
    }
}

fn read_records(path: &Path) -> Result<RecordMap> {
    if !path.exists() {
        return Ok(RecordMap::new());
    }
    let file = File::open(path)?;
    let lock = RwLock::new(file);
    let guard = lock
        .read()
        .map_err(|e| Error::lock_failed(e.to_string()))?;
    let mut data = String::new();
    (&*guard).read_to_string(&mut data)?;
    if data.trim().is_empty() {
        return Ok(RecordMap::new());
    }
    serde_json::from_str(&data).with_context(|| format!("parse {}", path.display()))
}

fn write_records(path: &Path, records: &RecordMap) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(records)?;
    let file = OpenOptions::new().create(true).write(true).truncate(false).open(path)?;
    let mut lock = RwLock::new(file);
    let mut guard = lock
        .write()
        .map_err(|e| Error::lock_failed(e.to_string()))?;
    guard.set_len(0)?;
    guard.write_all(data.as_bytes())?;
    guard.sync_data()?;
    Ok(())
}

#[async_trait]
impl SessionStore for JsonFileSessionStore {
    async fn get(&self, user_id: UserId) -> Result<Option<SessionRecord>> {
        Ok(self.load().await?.remove(&user_id))
    }

    async fn put(&self, record: SessionRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        records.insert(record.user_id, record);
        self.save(records).await
    }

    async fn list(&self) -> Result<Vec<SessionRecord>> {
        Ok(self.load().await?.into_values().collect())
    }

    async fn record_panel(&self, user_id: UserId, panel: PanelMessage) -> Result<SessionRecord> {
        debug!(
            %user_id,
            chat_id = %panel.chat_id,
            panel_id = %panel.panel_id,
            path = %self.path.display(),
            "recording panel"
        );
        self.modify(user_id, |r| r.record_panel(panel)).await
    }

    async fn set_state(&self, user_id: UserId, state: SessionState) -> Result<SessionRecord> {
        debug!(%user_id, ?state, path = %self.path.display(), "setting session state");
        self.modify(user_id, |r| r.set_state(state)).await
    }
}
