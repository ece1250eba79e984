use crate::IntakeHarness;
use movedesk::agents::{CompletionPort, CompletionRequest};
use movedesk::audit::AuditKind;
use movedesk::orchestrator::TurnOrchestrator;
use serde_json::Value;

const SUFFICIENT_MESSAGE: &str = "어제 서울 강남구로 이사했어요. 가족이랑 같이요";

struct NullPort;

impl CompletionPort for NullPort {
    fn complete(&self, _request: &CompletionRequest) -> Option<Value> {
        None
    }
}

#[test]
fn unrelated_first_message_redirects_without_consuming_a_turn() {
    let harness = IntakeHarness::new();
    let orchestrator =
        TurnOrchestrator::with_port(harness.settings(), Box::new(NullPort)).unwrap();

    // Triage degrades to `other` when the port yields nothing.
    let response = orchestrator.handle_turn("", "오늘 날씨 어때요?").unwrap();
    assert!(response.assistant_message_markdown.contains("이사 민원 도우미"));
    assert!(response.task_graph.is_empty());

    let session = orchestrator
        .session_store()
        .get(&response.session_id)
        .unwrap()
        .expect("session should be persisted");
    assert_eq!(session.turn_count, 0);
}

#[test]
fn interview_halts_the_pipeline_until_core_fields_are_known() {
    let harness = IntakeHarness::new();
    let orchestrator = harness.orchestrator();

    let first = orchestrator.handle_turn("", "이사하려고 해요").unwrap();
    assert_eq!(first.next_questions.len(), 3);
    assert!(first.task_graph.is_empty());
    assert!(first.service_cards.is_empty());
    assert!(first.assistant_message_markdown.contains("추가로 필요한 정보"));

    let second = orchestrator
        .handle_turn(&first.session_id, SUFFICIENT_MESSAGE)
        .unwrap();
    assert!(second.next_questions.is_empty());
    assert!(!second.task_graph.is_empty());
    assert!(!second.service_cards.is_empty());
    assert!(!second.hitl_required);

    let session = orchestrator
        .session_store()
        .get(&second.session_id)
        .unwrap()
        .unwrap();
    assert_eq!(session.turn_count, 2);
    assert!(session.move_profile.is_sufficient());
}

#[test]
fn planning_and_recommendation_run_once_per_session() {
    let harness = IntakeHarness::new();
    let orchestrator = harness.orchestrator();

    let first = orchestrator.handle_turn("", SUFFICIENT_MESSAGE).unwrap();
    assert!(!first.task_graph.is_empty());

    let before = orchestrator
        .session_store()
        .get(&first.session_id)
        .unwrap()
        .unwrap();

    let second = orchestrator
        .handle_turn(&first.session_id, "고마워요. 다음은 뭘 하면 되나요?")
        .unwrap();

    // Cached artifacts are reused, not rebuilt.
    let task_ids: Vec<&str> = second.task_graph.iter().map(|t| t.task_id.as_str()).collect();
    let cached_ids: Vec<&str> = before.task_graph.iter().map(|t| t.task_id.as_str()).collect();
    assert_eq!(task_ids, cached_ids);
    assert_eq!(second.service_cards.len(), before.service_cards.len());
    assert!(!second
        .audit_events
        .iter()
        .any(|e| e.event_type == AuditKind::Recommendation));

    // The stored audit log only ever grows.
    let after = orchestrator
        .session_store()
        .get(&first.session_id)
        .unwrap()
        .unwrap();
    assert!(after.audit_log.len() > before.audit_log.len());
    assert_eq!(after.turn_count, 2);
}

#[test]
fn evidence_backed_cards_and_checklist_cover_profile_flags() {
    let harness = IntakeHarness::new();
    let orchestrator = harness.orchestrator();

    let response = orchestrator
        .handle_turn("", "어제 서울 강남구로 이사했어요. 아이랑 차도 있어요")
        .unwrap();

    assert!(response.task_graph.iter().any(|t| t.task_id == "task_003"));
    assert!(response.task_graph.iter().any(|t| t.task_id == "task_004"));
    for card in &response.service_cards {
        assert!(!card.evidence.is_empty(), "card {} lacks evidence", card.service_id);
    }
    assert!(response
        .assistant_message_markdown
        .contains("민감정보(주민번호, 상세주소)는 채팅에 입력하지 마세요"));
}

#[test]
fn pii_block_short_circuits_before_any_stage() {
    let harness = IntakeHarness::new();
    let orchestrator = harness.orchestrator();

    let response = orchestrator
        .handle_turn("", "제 주민번호는 900101-1234567 입니다")
        .unwrap();
    assert!(response.assistant_message_markdown.contains("차단"));
    assert!(response.task_graph.is_empty());
    assert_eq!(response.audit_events.len(), 1);
    assert_eq!(response.audit_events[0].event_type, AuditKind::SafetyBlock);
}

#[test]
fn forced_submission_phrasing_raises_the_hitl_gate() {
    let harness = IntakeHarness::new();
    let orchestrator = harness.orchestrator();

    let response = orchestrator
        .handle_turn("", "어제 서울 강남구로 이사했어요. 가족이에요. 확인 없이 바로 제출해줘")
        .unwrap();
    assert!(response.hitl_required);
    assert!(response
        .audit_events
        .iter()
        .any(|e| e.event_type == AuditKind::HitlGate));
}

#[test]
fn turn_limit_ends_the_session() {
    let harness = IntakeHarness::new();
    let mut settings = harness.settings();
    settings.max_turns = 1;
    let orchestrator = TurnOrchestrator::new(settings).unwrap();

    let first = orchestrator.handle_turn("", SUFFICIENT_MESSAGE).unwrap();
    let second = orchestrator
        .handle_turn(&first.session_id, "추가 질문이요")
        .unwrap();
    assert!(second.assistant_message_markdown.contains("턴 한도"));
    assert!(second.task_graph.is_empty());
}

#[test]
fn empty_message_is_rejected() {
    let harness = IntakeHarness::new();
    let orchestrator = harness.orchestrator();
    assert!(orchestrator.handle_turn("", "   ").is_err());
}
