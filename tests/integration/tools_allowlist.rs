use crate::IntakeHarness;
use movedesk::drafts::DraftLedger;
use movedesk::tools::{dispatch, ToolCall, ToolName, ToolOutput};
use std::str::FromStr;

#[test]
fn unknown_tool_names_are_rejected_at_parse_time() {
    assert_eq!(
        ToolName::from_str("search_services").unwrap(),
        ToolName::SearchServices
    );
    let err = ToolName::from_str("delete_everything").unwrap_err();
    assert!(err.to_string().contains("delete_everything"));
}

#[test]
fn every_tool_name_round_trips() {
    for name in [
        ToolName::SearchServices,
        ToolName::GetServiceDetail,
        ToolName::GetFormSchema,
        ToolName::CreateApplicationDraft,
    ] {
        assert_eq!(ToolName::from_str(name.as_str()).unwrap(), name);
    }
}

#[test]
fn search_is_capped_and_detail_lookup_works() {
    let _harness = IntakeHarness::new();
    let ledger = DraftLedger::new().unwrap();

    let call = ToolCall::SearchServices {
        query: "이사".to_string(),
        region: "서울특별시".to_string(),
        tags: vec!["이사".to_string(), "자녀".to_string()],
    };
    let ToolOutput::Services(records) = dispatch(call, &ledger).unwrap() else {
        panic!("expected service list");
    };
    assert!(!records.is_empty());
    assert!(records.len() <= 5);
    // Tag-matching services rank ahead of the rest.
    assert_eq!(records[0].service_id, "SVC004");

    let detail = ToolCall::GetServiceDetail {
        service_id: "SVC001".to_string(),
    };
    let ToolOutput::ServiceDetail(Some(record)) = dispatch(detail, &ledger).unwrap() else {
        panic!("expected service detail");
    };
    assert_eq!(record.service_name, "전입신고");

    let missing = ToolCall::GetServiceDetail {
        service_id: "SVC999".to_string(),
    };
    let ToolOutput::ServiceDetail(found) = dispatch(missing, &ledger).unwrap() else {
        panic!("expected service detail");
    };
    assert!(found.is_none());
}
