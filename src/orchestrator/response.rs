//! Outward response types and markdown assembly.

use crate::audit::AuditEvent;
use crate::drafts::Draft;
use crate::interview::NextQuestion;
use crate::planning::{Priority, TaskNode};
use crate::profile::MoveProfile;
use crate::recommend::ServiceCard;
use crate::session::SessionData;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Closed set of follow-up actions the caller may surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    OpenLink,
    CreateDraft,
    CallCenter,
    VisitOffice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub label: String,
    #[serde(default)]
    pub payload: Map<String, Value>,
}

/// One full turn result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub assistant_message_markdown: String,
    #[serde(default)]
    pub next_questions: Vec<NextQuestion>,
    #[serde(default)]
    pub suggested_actions: Vec<SuggestedAction>,
    #[serde(default)]
    pub service_cards: Vec<ServiceCard>,
    #[serde(default)]
    pub task_graph: Vec<TaskNode>,
    #[serde(default)]
    pub audit_events: Vec<AuditEvent>,
    #[serde(default)]
    pub hitl_required: bool,
    #[serde(default)]
    pub draft_id: Option<String>,
    #[serde(default)]
    pub draft_preview: Option<Map<String, Value>>,
}

impl ChatResponse {
    /// Terminal response carrying only a message and the turn's audit trail.
    pub fn message_only(
        session_id: impl Into<String>,
        markdown: impl Into<String>,
        audit_events: Vec<AuditEvent>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            assistant_message_markdown: markdown.into(),
            next_questions: Vec::new(),
            suggested_actions: Vec::new(),
            service_cards: Vec::new(),
            task_graph: Vec::new(),
            audit_events,
            hitl_required: false,
            draft_id: None,
            draft_preview: None,
        }
    }
}

fn field_or_unknown(value: Option<&String>) -> &str {
    value.map(String::as_str).unwrap_or("unknown")
}

/// Interview-stage message: confirmed facts so far, then the open questions.
pub fn interview_markdown(questions: &[NextQuestion], profile: &MoveProfile) -> String {
    let mut lines = vec!["이사 관련 민원을 도와드릴게요!\n".to_string()];

    let mut confirmed = Vec::new();
    if let Some(date) = profile.move_date.as_known() {
        confirmed.push(format!("- **이사 날짜**: {date} ✓"));
    }
    if let Some(sido) = profile.to_region.sido.as_known() {
        let mut region = sido.clone();
        if let Some(sgg) = profile.to_region.sgg.as_known() {
            region.push(' ');
            region.push_str(sgg);
        }
        confirmed.push(format!("- **이사 지역**: {region} ✓"));
    }
    if profile.household_type.is_known() {
        confirmed.push(format!("- **세대 유형**: {} ✓", profile.household_type.label()));
    }

    if !confirmed.is_empty() {
        lines.push("**확인된 정보:**".to_string());
        lines.extend(confirmed);
        lines.push(String::new());
    }

    lines.push("**추가로 필요한 정보:**".to_string());
    for question in questions {
        lines.push(format!("- {}", question.question));
    }

    lines.join("\n")
}

/// Final turn message: profile summary, checklist, top cards, optional draft
/// preview, and the standing privacy warning.
pub fn summary_markdown(session: &SessionData, draft: Option<&Draft>, hitl_required: bool) -> String {
    let profile = &session.move_profile;
    let mut lines = Vec::new();

    lines.push("## 이사 민원 안내".to_string());
    lines.push(format!(
        "**이사 지역**: {} {}  ",
        field_or_unknown(profile.to_region.sido.as_known()),
        field_or_unknown(profile.to_region.sgg.as_known()),
    ));
    let date_line = match profile.move_date.as_known() {
        Some(date) => date.to_string(),
        None => "unknown".to_string(),
    };
    lines.push(format!("**이사 날짜**: {date_line}  "));
    lines.push(format!("**세대 유형**: {}\n", profile.household_type.label()));

    if !session.task_graph.is_empty() {
        lines.push("### ✅ 해야 할 일 (우선순위)".to_string());
        for task in &session.task_graph {
            let emoji = match task.priority {
                Priority::P0 => "🔴",
                Priority::P1 => "🟡",
                Priority::P2 => "🟢",
            };
            let hitl = if task.requires_hitl {
                " *(최종 확인 필요)*"
            } else {
                ""
            };
            lines.push(format!(
                "- {emoji} **{}** ({:?}){hitl}",
                task.title, task.priority
            ));
        }
        lines.push(String::new());
    }

    if !session.service_cards.is_empty() {
        lines.push("### 📋 추천 서비스".to_string());
        for card in session.service_cards.iter().take(3) {
            lines.push(format!("\n**{}**", card.service_name));
            if let Some(reason) = card.why_recommended.first() {
                lines.push(format!("- 추천 이유: {reason}"));
            }
            if !card.main_url.is_empty() {
                lines.push(format!("- 링크: {}", card.main_url));
            }
            if !card.required_documents.is_empty() {
                lines.push(format!("- 필요 서류: {}", card.required_documents.join(", ")));
            }
        }
        lines.push(String::new());
    }

    if let Some(draft) = draft {
        lines.push("### 📝 신청서 초안".to_string());
        lines.push(format!("**초안 ID**: `{}`\n", draft.draft_id));
        lines.push("```".to_string());
        for (key, value) in &draft.preview {
            let shown = match value {
                Value::String(s) => s.clone(),
                Value::Null => "null".to_string(),
                other => other.to_string(),
            };
            lines.push(format!("{key}: {shown}"));
        }
        lines.push("```".to_string());
        lines.push(String::new());
    }

    lines.push("---".to_string());
    lines.push("⚠️ **주의**: 민감정보(주민번호, 상세주소)는 채팅에 입력하지 마세요.".to_string());
    if hitl_required {
        lines.push("📌 **제출 전 반드시 내용을 직접 확인하신 후 진행해 주세요.**".to_string());
    }

    lines.join("\n")
}

/// Follow-up actions for the assembled response.
pub fn build_actions(session: &SessionData, draft: Option<&Draft>) -> Vec<SuggestedAction> {
    let mut actions = Vec::new();

    if draft.is_none() {
        let mut payload = Map::new();
        payload.insert("service_id".to_string(), Value::String("SVC001".to_string()));
        actions.push(SuggestedAction {
            kind: ActionKind::CreateDraft,
            label: "전입신고 초안 만들기".to_string(),
            payload,
        });
    }

    if let Some(card) = session.service_cards.first() {
        if !card.main_url.is_empty() {
            let mut payload = Map::new();
            payload.insert("url".to_string(), Value::String(card.main_url.clone()));
            actions.push(SuggestedAction {
                kind: ActionKind::OpenLink,
                label: "gov.kr 바로가기".to_string(),
                payload,
            });
        }
    }

    if draft.is_some() {
        let mut payload = Map::new();
        payload.insert(
            "office".to_string(),
            Value::String("관할 읍·면·동 행정복지센터".to_string()),
        );
        actions.push(SuggestedAction {
            kind: ActionKind::VisitOffice,
            label: "방문 접수 안내".to_string(),
            payload,
        });
    }

    let mut payload = Map::new();
    payload.insert(
        "contact".to_string(),
        Value::String("가까운 읍·면·동 행정복지센터".to_string()),
    );
    actions.push(SuggestedAction {
        kind: ActionKind::CallCenter,
        label: "주민센터 문의".to_string(),
        payload,
    });

    actions
}
