// src/services/session.rs
//
// Key-value persisted state: signed-in sessions and each user's clock state.

use crate::{
    errors::AppResult,
    models::{ClockState, User},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::PathBuf, sync::Arc};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

/// Holds every signed-in user's session, keyed by user id.
pub const SESSION_USER_KEY: &str = "tyrecentre_user";

pub fn clock_key(user_id: &str) -> String {
    format!("attendance_{user_id}")
}

/// String-keyed storage for small JSON documents.
#[async_trait]
pub trait PersistedState: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;
    async fn remove(&self, key: &str) -> AppResult<()>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersistedState for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per entry under a directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub async fn open(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

#[async_trait]
impl PersistedState for JsonFileStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(key, path = %path.display(), "Persisted state written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// A signed-in user. Tokens carry `session_id` as their `jti`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub session_id: Uuid,
    pub user: User,
}

type Sessions = HashMap<String, StoredSession>;

/// Typed access to the persisted sessions and clock states.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn PersistedState>,
    // Serializes read-modify-write cycles on the session map.
    session_lock: Arc<Mutex<()>>,
    // Same for clock state.
    clock_lock: Arc<Mutex<()>>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn PersistedState>) -> Self {
        Self {
            backend,
            session_lock: Arc::new(Mutex::new(())),
            clock_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn sessions(&self) -> AppResult<Sessions> {
        match self.backend.get(SESSION_USER_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Sessions::new()),
        }
    }

    async fn save_sessions(&self, sessions: &Sessions) -> AppResult<()> {
        if sessions.is_empty() {
            return self.backend.remove(SESSION_USER_KEY).await;
        }
        let raw = serde_json::to_string(sessions)?;
        self.backend.set(SESSION_USER_KEY, &raw).await
    }

    /// Start a fresh session for `user`, replacing any earlier one, and
    /// return its id.
    pub async fn start(&self, user: &User) -> AppResult<Uuid> {
        let _guard = self.session_lock.lock().await;
        let mut sessions = self.sessions().await?;
        let session_id = Uuid::new_v4();
        sessions.insert(
            user.id.clone(),
            StoredSession {
                session_id,
                user: user.clone(),
            },
        );
        self.save_sessions(&sessions).await?;
        Ok(session_id)
    }

    pub async fn session(&self, user_id: &str) -> AppResult<Option<StoredSession>> {
        Ok(self.sessions().await?.remove(user_id))
    }

    pub async fn is_active(&self, user_id: &str, session_id: Uuid) -> AppResult<bool> {
        Ok(self
            .session(user_id)
            .await?
            .is_some_and(|s| s.session_id == session_id))
    }

    pub async fn active_count(&self) -> AppResult<usize> {
        Ok(self.sessions().await?.len())
    }

    /// End `user_id`'s session. Other users stay signed in.
    pub async fn end(&self, user_id: &str) -> AppResult<bool> {
        let _guard = self.session_lock.lock().await;
        let mut sessions = self.sessions().await?;
        let removed = sessions.remove(user_id).is_some();
        if removed {
            self.save_sessions(&sessions).await?;
        }
        Ok(removed)
    }

    pub async fn clock_state(&self, user_id: &str) -> AppResult<ClockState> {
        match self.backend.get(&clock_key(user_id)).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(ClockState::default()),
        }
    }

    /// Load, mutate and save one user's clock state as a unit. Nothing is
    /// written when `apply` fails.
    pub async fn update_clock<F>(&self, user_id: &str, apply: F) -> AppResult<ClockState>
    where
        F: FnOnce(&mut ClockState) -> AppResult<()>,
    {
        let _guard = self.clock_lock.lock().await;
        let mut state = self.clock_state(user_id).await?;
        apply(&mut state)?;
        let raw = serde_json::to_string(&state)?;
        self.backend.set(&clock_key(user_id), &raw).await?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::AppError, models::Role};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn admin() -> User {
        User {
            id: "1".to_string(),
            email: "admin@tyrecentre.com".to_string(),
            name: "Admin User".to_string(),
            role: Role::Admin,
            employee_id: None,
        }
    }

    fn employee() -> User {
        User {
            id: "2".to_string(),
            email: "employee@tyrecentre.com".to_string(),
            name: "John Doe".to_string(),
            role: Role::Employee,
            employee_id: Some("EMP001".to_string()),
        }
    }

    #[tokio::test]
    async fn session_starts_and_ends() {
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        assert!(store.session("1").await.unwrap().is_none());

        let id = store.start(&admin()).await.unwrap();
        let stored = store.session("1").await.unwrap().unwrap();
        assert_eq!(stored.user, admin());
        assert!(store.is_active("1", id).await.unwrap());

        assert!(store.end("1").await.unwrap());
        assert!(!store.is_active("1", id).await.unwrap());
        assert!(!store.end("1").await.unwrap());
    }

    #[tokio::test]
    async fn signing_in_again_replaces_the_earlier_session() {
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        let first = store.start(&admin()).await.unwrap();
        let second = store.start(&admin()).await.unwrap();

        assert!(!store.is_active("1", first).await.unwrap());
        assert!(store.is_active("1", second).await.unwrap());
        assert_eq!(store.active_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn sessions_are_kept_per_user() {
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        let admin_session = store.start(&admin()).await.unwrap();
        let employee_session = store.start(&employee()).await.unwrap();
        assert_eq!(store.active_count().await.unwrap(), 2);

        store.end("2").await.unwrap();
        assert!(store.is_active("1", admin_session).await.unwrap());
        assert!(!store.is_active("2", employee_session).await.unwrap());
    }

    #[tokio::test]
    async fn sessions_are_stored_under_session_key_in_camel_case() {
        let backend = Arc::new(MemoryStore::new());
        let store = SessionStore::new(backend.clone());
        store.start(&employee()).await.unwrap();

        let raw = backend.get(SESSION_USER_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value["2"]["sessionId"].is_string());
        assert_eq!(value["2"]["user"]["employeeId"], "EMP001");
        assert_eq!(value["2"]["user"]["role"], "employee");

        store.end("2").await.unwrap();
        assert!(backend.get(SESSION_USER_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failed_clock_transition_writes_nothing() {
        let backend = Arc::new(MemoryStore::new());
        let store = SessionStore::new(backend.clone());

        let result = store.update_clock("2", |s| s.clock_out(Utc::now())).await;
        assert!(matches!(result, Err(AppError::InvalidTransition(_))));
        assert!(backend.get(&clock_key("2")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clock_state_persists_with_expected_keys() {
        let backend = Arc::new(MemoryStore::new());
        let store = SessionStore::new(backend.clone());
        let start = Utc.with_ymd_and_hms(2024, 10, 24, 9, 0, 0).unwrap();

        store.update_clock("2", |s| s.clock_in(start)).await.unwrap();

        let raw = backend.get("attendance_2").await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        for key in ["clockedIn", "onBreak", "clockInTime", "breakStartTime", "totalWorkedHours", "totalBreakTime"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }

        let restored = store.clock_state("2").await.unwrap();
        assert!(restored.clocked_in);
        assert_eq!(restored.clock_in_time, Some(start));
        assert_eq!(restored.total_worked_hours, dec!(0));
    }

    #[tokio::test]
    async fn json_file_store_survives_reopen() {
        let dir = std::env::temp_dir().join(format!("tyre-centre-{}", uuid::Uuid::new_v4()));
        let id = {
            let store = SessionStore::new(Arc::new(JsonFileStore::open(&dir).await.unwrap()));
            store.start(&admin()).await.unwrap()
        };

        let reopened = SessionStore::new(Arc::new(JsonFileStore::open(&dir).await.unwrap()));
        assert!(reopened.is_active("1", id).await.unwrap());
        assert_eq!(reopened.session("1").await.unwrap().unwrap().user, admin());

        assert!(reopened.end("1").await.unwrap());
        assert!(!reopened.end("1").await.unwrap());
        assert!(reopened.session("1").await.unwrap().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
