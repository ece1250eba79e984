//! Turn orchestration: the fixed pipeline every user message runs through.
//!
//! Order is invariant: safety gate, session load, first-turn triage, profile
//! extraction and merge, interview gate, planning, recommendation, optional
//! drafting, persistence, response assembly. Planning and recommendation run
//! at most once per session; later turns reuse the stored artifacts.

pub mod response;

pub use response::{ActionKind, ChatResponse, SuggestedAction};

use crate::agents::{self, CompletionPort, Intent};
use crate::audit::{AuditEvent, AuditKind};
use crate::config::Settings;
use crate::drafts::{Draft, DraftLedger};
use crate::extraction::ProfileExtractor;
use crate::forms;
use crate::interview::InterviewPlanner;
use crate::planning::build_task_graph;
use crate::profile::MoveProfile;
use crate::recommend::{build_service_cards, profile_tags};
use crate::safety::SafetyGate;
use crate::session::SessionStore;
use crate::tools::{self, ToolCall, ToolName, ToolOutput};
use anyhow::{bail, Result};
use chrono::Utc;
use tracing::{debug, warn};

const TRANSFER_REPORT_SERVICE: &str = "SVC001";

pub struct TurnOrchestrator {
    settings: Settings,
    store: SessionStore,
    ledger: DraftLedger,
    port: Box<dyn CompletionPort>,
    gate: SafetyGate,
    extractor: ProfileExtractor,
    planner: InterviewPlanner,
}

impl TurnOrchestrator {
    pub fn new(settings: Settings) -> Result<Self> {
        let port = agents::port_from_settings(&settings);
        Self::with_port(settings, port)
    }

    /// Construction with an explicit completion port.
    pub fn with_port(settings: Settings, port: Box<dyn CompletionPort>) -> Result<Self> {
        Ok(Self {
            settings,
            store: SessionStore::new()?,
            ledger: DraftLedger::new()?,
            port,
            gate: SafetyGate::new(),
            extractor: ProfileExtractor::korean(),
            planner: InterviewPlanner::new(),
        })
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.store
    }

    pub fn draft_ledger(&self) -> &DraftLedger {
        &self.ledger
    }

    /// Runs one full turn and returns the assembled response.
    pub fn handle_turn(&self, session_id: &str, user_message: &str) -> Result<ChatResponse> {
        let message = user_message.trim();
        if message.is_empty() {
            bail!("메시지를 입력해 주세요.");
        }

        let mut audit_events: Vec<AuditEvent> = Vec::new();

        // Safety gate runs before anything else touches the message.
        let verdict = self.gate.evaluate(message);
        audit_events.push(verdict.audit_event.clone());
        if verdict.block {
            let reason = verdict
                .block_reason
                .unwrap_or_else(|| "입력이 차단되었습니다.".to_string());
            warn!(session_id, "message blocked by safety gate");
            let markdown = format!(
                "⚠️ **입력이 차단되었습니다.**\n\n{reason}\n\n\
                 주민등록번호, 계좌번호 등의 민감정보는 채팅에 입력하지 마세요."
            );
            return Ok(ChatResponse::message_only(session_id, markdown, audit_events));
        }

        let mut session = self.store.get_or_create(session_id)?;
        let session_id = session.session_id.clone();

        // Intent triage only on the first substantive turn.
        if session.turn_count == 0 {
            let triage = agents::run_triage(self.port.as_ref(), message);
            debug!(session_id = %session_id, intent = triage.intent.as_str(), "triage");
            if triage.intent == Intent::Other {
                let markdown = "안녕하세요! 저는 **이사 민원 도우미**입니다. 🏠\n\n\
                                전입신고, 자동차 주소 변경, 자녀 전학 등 이사와 관련된 \
                                행정 절차를 도와드려요.\n\n\
                                이사 계획이 있으시면 말씀해 주세요!";
                return Ok(ChatResponse::message_only(session_id, markdown, audit_events));
            }
        }

        if session.turn_count >= self.settings.max_turns {
            let markdown = "세션 턴 한도에 도달했습니다. 새 세션으로 다시 시작해 주세요.";
            return Ok(ChatResponse::message_only(session_id, markdown, audit_events));
        }
        session.turn_count += 1;

        let mut hitl_required = verdict.requires_hitl;

        // Extract facts from this message, merge monotonically.
        let today = Utc::now().date_naive();
        let patch = self
            .extractor
            .extract(message, &session.move_profile, today);
        if !patch.is_empty() {
            session.move_profile = session.move_profile.merge_patch(&patch);
            audit_events.push(AuditEvent::new(
                AuditKind::StateUpdate,
                "메시지에서 프로필 정보를 추출하여 병합함",
            ));
        }

        // Interview gate: halt the pipeline while core facts are missing.
        let mut questions = self.planner.questions(&session.move_profile);
        if self.settings.interview_followup {
            if let Some(refined) =
                self.planner
                    .refine(self.port.as_ref(), &session.move_profile, Intent::Move)
            {
                questions = refined;
            }
        }
        if !questions.is_empty()
            && !session
                .move_profile
                .meets_threshold(self.settings.profile_min_fields)
        {
            audit_events.push(AuditEvent::new(
                AuditKind::StateUpdate,
                format!("인터뷰 진행 중 (턴 {})", session.turn_count),
            ));
            session.audit_log.extend(audit_events.clone());
            self.store.update(&session_id, &session)?;

            let markdown = response::interview_markdown(&questions, &session.move_profile);
            return Ok(ChatResponse {
                session_id,
                assistant_message_markdown: markdown,
                next_questions: questions,
                suggested_actions: Vec::new(),
                service_cards: Vec::new(),
                task_graph: Vec::new(),
                audit_events,
                hitl_required,
                draft_id: None,
                draft_preview: None,
            });
        }

        // Planning runs once; later turns reuse the stored graph.
        if session.task_graph.is_empty() {
            session.task_graph = build_task_graph(&session.move_profile);
            debug!(session_id = %session_id, tasks = session.task_graph.len(), "task graph built");
            audit_events.push(AuditEvent::new(
                AuditKind::Recommendation,
                format!("태스크 그래프 생성: {}개", session.task_graph.len()),
            ));
        }

        // Recommendation likewise runs once.
        if session.service_cards.is_empty() {
            let tags = profile_tags(&session.move_profile);
            let region = session
                .move_profile
                .to_region
                .sido
                .as_known()
                .cloned()
                .unwrap_or_default();
            let call = ToolCall::SearchServices {
                query: "이사".to_string(),
                region,
                tags,
            };
            audit_events.push(
                AuditEvent::new(AuditKind::ToolCall, "서비스 조회")
                    .with_tool(call.name().as_str()),
            );
            if let ToolOutput::Services(records) = tools::dispatch(call, &self.ledger)? {
                session.service_cards = build_service_cards(&session.move_profile, &records);
            }
            let evidence = session
                .service_cards
                .iter()
                .map(|card| card.service_id.clone())
                .collect();
            audit_events.push(
                AuditEvent::new(
                    AuditKind::Recommendation,
                    format!("서비스 카드 {}건 추천", session.service_cards.len()),
                )
                .with_evidence(evidence),
            );
        }

        // Drafting only when this message asks for it.
        let mut draft: Option<Draft> = None;
        if self.extractor.rules().wants_draft(message) {
            draft = self.create_draft(&session.move_profile, &mut audit_events)?;
            if draft.is_some() {
                hitl_required = true;
            }
        }

        session.audit_log.extend(audit_events.clone());
        self.store.update(&session_id, &session)?;

        let suggested_actions = response::build_actions(&session, draft.as_ref());
        let markdown = response::summary_markdown(&session, draft.as_ref(), hitl_required);
        Ok(ChatResponse {
            session_id,
            assistant_message_markdown: markdown,
            next_questions: Vec::new(),
            suggested_actions,
            service_cards: session.service_cards.clone(),
            task_graph: session.task_graph.clone(),
            audit_events,
            hitl_required,
            draft_id: draft.as_ref().map(|d| d.draft_id.clone()),
            draft_preview: draft.map(|d| d.preview),
        })
    }

    fn create_draft(
        &self,
        profile: &MoveProfile,
        audit_events: &mut Vec<AuditEvent>,
    ) -> Result<Option<Draft>> {
        let schema_call = ToolCall::GetFormSchema {
            service_id: TRANSFER_REPORT_SERVICE.to_string(),
        };
        let schema = match tools::dispatch(schema_call, &self.ledger)? {
            ToolOutput::FormSchema(Some(schema)) => schema,
            _ => return Ok(None),
        };

        let fill = forms::run_form_fill(
            self.port.as_ref(),
            TRANSFER_REPORT_SERVICE,
            profile,
            &schema,
        );
        let create_call = ToolCall::CreateApplicationDraft {
            service_id: TRANSFER_REPORT_SERVICE.to_string(),
            payload: fill.draft_payload,
            sensitive: schema.sensitive_field_names(),
        };
        let draft = match tools::dispatch(create_call, &self.ledger)? {
            ToolOutput::Draft(draft) => draft,
            _ => return Ok(None),
        };

        audit_events.push(
            AuditEvent::new(
                AuditKind::ToolCall,
                format!("신청서 초안 생성: {}", draft.draft_id),
            )
            .with_tool(ToolName::CreateApplicationDraft.as_str()),
        );
        audit_events.push(AuditEvent::new(
            AuditKind::HitlGate,
            format!("초안 {} 제출 전 사용자 확인 필요", draft.draft_id),
        ));
        Ok(Some(draft))
    }
}
