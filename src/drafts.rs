//! Application-draft ledger with a strict submission lifecycle.
//!
//! Drafts live in their own store keyed by draft id, independent of the
//! conversational session. `draft → submitted` and `draft → cancelled` are
//! both terminal; terminal drafts reject any further transition.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Fixed marker shown in place of any sensitive field value.
pub const REDACTION_MARKER: &str = "****(안전한 입력 단계에서 입력 필요)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    Draft,
    Submitted,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub draft_id: String,
    pub service_id: String,
    /// Masked field preview; sensitive values never appear here.
    pub preview: Map<String, Value>,
    pub missing_fields: Vec<String>,
    pub status: DraftStatus,
    pub note: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("초안을 찾을 수 없습니다: {0}")]
    NotFound(String),
    #[error("이미 종결된 초안입니다: {draft_id}")]
    Conflict {
        draft_id: String,
        status: DraftStatus,
    },
    #[error("초안 저장소 오류")]
    Storage(#[source] anyhow::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitReceipt {
    pub draft_id: String,
    pub status: DraftStatus,
    pub submitted_at: Option<DateTime<Utc>>,
    pub message: String,
}

/// File-per-draft store under the workspace `drafts/` directory.
pub struct DraftLedger {
    drafts_dir: PathBuf,
}

impl DraftLedger {
    pub fn new() -> anyhow::Result<Self> {
        let paths = crate::config::ensure_workspace_structure()?;
        Ok(Self {
            drafts_dir: paths.drafts_dir,
        })
    }

    fn draft_path(&self, draft_id: &str) -> PathBuf {
        self.drafts_dir.join(format!("{draft_id}.json"))
    }

    /// Creates a draft from a filled payload. Fields named in `sensitive`
    /// are masked in the preview; null-valued fields are listed as missing.
    pub fn create(
        &self,
        service_id: &str,
        payload: &Map<String, Value>,
        sensitive: &[String],
    ) -> anyhow::Result<Draft> {
        let short_id = Uuid::new_v4().to_string()[..8].to_uppercase();
        let draft_id = format!("DRAFT-{short_id}");

        let mut preview = Map::new();
        for (key, value) in payload {
            if sensitive.iter().any(|s| s == key) {
                preview.insert(key.clone(), Value::String(REDACTION_MARKER.to_string()));
            } else {
                preview.insert(key.clone(), value.clone());
            }
        }

        let missing_fields = payload
            .iter()
            .filter(|(_, value)| value.is_null())
            .map(|(key, _)| key.clone())
            .collect();

        let draft = Draft {
            draft_id: draft_id.clone(),
            service_id: service_id.to_string(),
            preview,
            missing_fields,
            status: DraftStatus::Draft,
            note: "⚠️ 초안이 생성되었습니다. 실제 제출 전 반드시 내용을 확인해 주세요.".to_string(),
            created_at: Utc::now(),
            submitted_at: None,
            cancelled_at: None,
            session_id: None,
        };
        self.persist(&draft)?;
        debug!(draft_id = %draft.draft_id, service_id, "draft created");
        Ok(draft)
    }

    pub fn get(&self, draft_id: &str) -> anyhow::Result<Option<Draft>> {
        let path = self.draft_path(draft_id);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read draft file {:?}", path))?;
        let draft = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse draft file {:?}", path))?;
        Ok(Some(draft))
    }

    /// Resolves a draft: `confirmed=false` cancels it, `confirmed=true`
    /// submits it. A draft already in a terminal state is a conflict.
    pub fn submit(
        &self,
        draft_id: &str,
        session_id: &str,
        confirmed: bool,
    ) -> Result<SubmitReceipt, DraftError> {
        let mut draft = self
            .get(draft_id)
            .map_err(DraftError::Storage)?
            .ok_or_else(|| DraftError::NotFound(draft_id.to_string()))?;

        if draft.status != DraftStatus::Draft {
            return Err(DraftError::Conflict {
                draft_id: draft_id.to_string(),
                status: draft.status,
            });
        }

        draft.session_id = Some(session_id.to_string());
        let receipt = if confirmed {
            draft.status = DraftStatus::Submitted;
            draft.submitted_at = Some(Utc::now());
            SubmitReceipt {
                draft_id: draft_id.to_string(),
                status: DraftStatus::Submitted,
                submitted_at: draft.submitted_at,
                message: "초안이 제출 대기 상태로 등록되었습니다.".to_string(),
            }
        } else {
            draft.status = DraftStatus::Cancelled;
            draft.cancelled_at = Some(Utc::now());
            SubmitReceipt {
                draft_id: draft_id.to_string(),
                status: DraftStatus::Cancelled,
                submitted_at: None,
                message: "초안이 취소되었습니다. 수정할 내용을 채팅으로 알려주세요.".to_string(),
            }
        };
        self.persist(&draft).map_err(DraftError::Storage)?;
        Ok(receipt)
    }

    fn persist(&self, draft: &Draft) -> anyhow::Result<()> {
        fs::create_dir_all(&self.drafts_dir)?;
        let path = self.draft_path(&draft.draft_id);
        let data = serde_json::to_string_pretty(draft)?;
        fs::write(&path, data)
            .with_context(|| format!("Failed to write draft file {:?}", path))?;
        Ok(())
    }
}
