//! Durable per-session aggregate, keyed by session id.
//!
//! One JSON snapshot per session under the workspace `sessions/` directory.
//! Upsert on every turn; concurrent writers for the same id are
//! last-write-wins with no locking.

use crate::audit::AuditEvent;
use crate::config;
use crate::planning::TaskNode;
use crate::profile::MoveProfile;
use crate::recommend::ServiceCard;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// Aggregate root for one conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: String,
    #[serde(default)]
    pub move_profile: MoveProfile,
    #[serde(default)]
    pub task_graph: Vec<TaskNode>,
    #[serde(default)]
    pub service_cards: Vec<ServiceCard>,
    #[serde(default)]
    pub audit_log: Vec<AuditEvent>,
    #[serde(default)]
    pub turn_count: u32,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(session_id: String) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            move_profile: MoveProfile::default(),
            task_graph: Vec::new(),
            service_cards: Vec::new(),
            audit_log: Vec::new(),
            turn_count: 0,
            created_at: now,
            last_active_at: now,
        }
    }
}

pub struct SessionStore {
    sessions_dir: PathBuf,
}

impl SessionStore {
    pub fn new() -> Result<Self> {
        let paths = config::ensure_workspace_structure()?;
        Ok(Self {
            sessions_dir: paths.sessions_dir,
        })
    }

    fn session_path(&self, session_id: &str) -> PathBuf {
        // Session ids may be caller-supplied; keep the filename tame.
        let safe: String = session_id
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        self.sessions_dir.join(format!("{safe}.json"))
    }

    pub fn get(&self, session_id: &str) -> Result<Option<SessionData>> {
        let path = self.session_path(session_id);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read session file {:?}", path))?;
        let session = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse session file {:?}", path))?;
        Ok(Some(session))
    }

    /// Loads the session, minting a fresh UUID id when none was supplied.
    pub fn get_or_create(&self, session_id: &str) -> Result<SessionData> {
        let session_id = if session_id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            session_id.to_string()
        };
        if let Some(existing) = self.get(&session_id)? {
            return Ok(existing);
        }
        let created = SessionData::new(session_id.clone());
        self.update(&session_id, &created)?;
        debug!(session_id = %session_id, "session created");
        Ok(created)
    }

    /// Writes the full snapshot back, stamping last-active.
    pub fn update(&self, session_id: &str, session: &SessionData) -> Result<()> {
        let mut snapshot = session.clone();
        snapshot.last_active_at = Utc::now();
        fs::create_dir_all(&self.sessions_dir)?;
        let path = self.session_path(session_id);
        let data = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&path, data)
            .with_context(|| format!("Failed to write session file {:?}", path))?;
        Ok(())
    }
}
