//! Append-only audit trail for pipeline decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a logged pipeline decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    Recommendation,
    ToolCall,
    HitlGate,
    SafetyBlock,
    StateUpdate,
}

/// One immutable log record. A session's audit log only ever grows; events
/// from every turn accumulate on the stored session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub event_type: AuditKind,
    pub timestamp: DateTime<Utc>,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence_refs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl AuditEvent {
    pub fn new(event_type: AuditKind, summary: impl Into<String>) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
            summary: summary.into(),
            evidence_refs: Vec::new(),
            tool_name: None,
        }
    }

    pub fn with_evidence(mut self, refs: Vec<String>) -> Self {
        self.evidence_refs = refs;
        self
    }

    pub fn with_tool(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }
}
