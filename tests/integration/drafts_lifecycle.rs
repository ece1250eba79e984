use crate::IntakeHarness;
use movedesk::drafts::{DraftError, DraftLedger, DraftStatus, REDACTION_MARKER};
use serde_json::{Map, Value};

fn payload() -> (Map<String, Value>, Vec<String>) {
    let mut payload = Map::new();
    payload.insert("move_date".to_string(), Value::String("2026-08-23".to_string()));
    payload.insert(
        "new_address_detail".to_string(),
        Value::String("101동 202호".to_string()),
    );
    payload.insert("resident_number".to_string(), Value::Null);
    let sensitive = vec![
        "new_address_detail".to_string(),
        "resident_number".to_string(),
    ];
    (payload, sensitive)
}

#[test]
fn sensitive_fields_are_masked_in_the_preview() {
    let harness = IntakeHarness::new();
    let ledger = DraftLedger::new().unwrap();
    let (payload, sensitive) = payload();

    let draft = ledger.create("SVC001", &payload, &sensitive).unwrap();
    assert!(draft.draft_id.starts_with("DRAFT-"));
    assert_eq!(draft.status, DraftStatus::Draft);
    assert_eq!(
        draft.preview["new_address_detail"],
        Value::String(REDACTION_MARKER.to_string())
    );
    assert_eq!(
        draft.preview["resident_number"],
        Value::String(REDACTION_MARKER.to_string())
    );
    assert_eq!(draft.preview["move_date"], Value::String("2026-08-23".to_string()));
    // Null-valued fields are surfaced as missing.
    assert_eq!(draft.missing_fields, ["resident_number"]);

    let loaded = ledger.get(&draft.draft_id).unwrap().unwrap();
    assert_eq!(loaded.status, DraftStatus::Draft);
    assert!(harness
        .workspace_path()
        .join("drafts")
        .join(format!("{}.json", draft.draft_id))
        .exists());
}

#[test]
fn submitted_draft_is_terminal() {
    let _harness = IntakeHarness::new();
    let ledger = DraftLedger::new().unwrap();
    let (payload, sensitive) = payload();
    let draft = ledger.create("SVC001", &payload, &sensitive).unwrap();

    let receipt = ledger.submit(&draft.draft_id, "sess-1", true).unwrap();
    assert_eq!(receipt.status, DraftStatus::Submitted);
    assert!(receipt.submitted_at.is_some());

    let err = ledger.submit(&draft.draft_id, "sess-1", true).unwrap_err();
    assert!(matches!(err, DraftError::Conflict { .. }));
}

#[test]
fn cancelled_draft_rejects_later_submission() {
    let _harness = IntakeHarness::new();
    let ledger = DraftLedger::new().unwrap();
    let (payload, sensitive) = payload();
    let draft = ledger.create("SVC001", &payload, &sensitive).unwrap();

    let receipt = ledger.submit(&draft.draft_id, "sess-1", false).unwrap();
    assert_eq!(receipt.status, DraftStatus::Cancelled);

    let err = ledger.submit(&draft.draft_id, "sess-1", true).unwrap_err();
    match err {
        DraftError::Conflict { status, .. } => assert_eq!(status, DraftStatus::Cancelled),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn unknown_draft_id_is_not_found() {
    let _harness = IntakeHarness::new();
    let ledger = DraftLedger::new().unwrap();
    let err = ledger.submit("DRAFT-NOPE", "sess-1", true).unwrap_err();
    assert!(matches!(err, DraftError::NotFound(_)));
}

#[test]
fn draft_request_in_chat_produces_a_masked_draft_and_hitl() {
    let harness = IntakeHarness::new();
    let orchestrator = harness.orchestrator();

    let response = orchestrator
        .handle_turn(
            "",
            "어제 서울 강남구로 이사했어요. 가족이에요. 전입신고 신청서 만들어 주세요",
        )
        .unwrap();

    assert!(response.hitl_required);
    let draft_id = response.draft_id.expect("draft expected");
    let preview = response.draft_preview.expect("preview expected");
    assert_eq!(
        preview["resident_number"],
        Value::String(REDACTION_MARKER.to_string())
    );
    assert!(response.assistant_message_markdown.contains("신청서 초안"));

    let stored = orchestrator.draft_ledger().get(&draft_id).unwrap().unwrap();
    assert_eq!(stored.status, DraftStatus::Draft);
}
