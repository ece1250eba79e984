use chrono::NaiveDate;
use movedesk::agents::{CompletionPort, CompletionRequest, MockPort};
use movedesk::forms::{fallback_fill, get_form_schema, run_form_fill};
use movedesk::profile::{Field, HouseholdType, MoveProfile};
use serde_json::Value;

struct SilentPort;

impl CompletionPort for SilentPort {
    fn complete(&self, _request: &CompletionRequest) -> Option<Value> {
        None
    }
}

fn filled_profile() -> MoveProfile {
    let mut profile = MoveProfile::default();
    profile.move_date = Field::Known(NaiveDate::from_ymd_opt(2026, 8, 23).unwrap());
    profile.to_region.sido = Field::Known("서울특별시".to_string());
    profile.to_region.sgg = Field::Known("강남구".to_string());
    profile.household_type = HouseholdType::Family;
    profile
}

#[test]
fn fallback_copies_known_fields_and_never_fills_sensitive_ones() {
    let schema = get_form_schema("SVC001").unwrap();
    let result = fallback_fill(&filled_profile(), &schema);

    assert_eq!(
        result.draft_payload["move_date"],
        Value::String("2026-08-23".to_string())
    );
    assert_eq!(
        result.draft_payload["new_address_sido"],
        Value::String("서울특별시".to_string())
    );
    assert_eq!(result.draft_payload["household_type"], Value::String("family".to_string()));
    // Sensitive fields stay null and are not raised as chat questions.
    assert_eq!(result.draft_payload["new_address_detail"], Value::Null);
    assert_eq!(result.draft_payload["resident_number"], Value::Null);
    assert!(result
        .missing_fields
        .iter()
        .all(|m| m.field != "resident_number" && m.field != "new_address_detail"));
    assert!(!result.warnings.is_empty());
}

#[test]
fn fallback_lists_required_unfilled_fields() {
    let schema = get_form_schema("SVC001").unwrap();
    let result = fallback_fill(&MoveProfile::default(), &schema);

    let fields: Vec<&str> = result.missing_fields.iter().map(|m| m.field.as_str()).collect();
    assert_eq!(
        fields,
        ["move_date", "new_address_sido", "new_address_sgg", "household_type"]
    );
    assert!(result
        .missing_fields
        .iter()
        .all(|m| m.question.contains("입력해주세요")));
}

#[test]
fn silent_port_degrades_to_the_fallback() {
    let schema = get_form_schema("SVC001").unwrap();
    let profile = filled_profile();
    let via_port = run_form_fill(&SilentPort, "SVC001", &profile, &schema);
    let direct = fallback_fill(&profile, &schema);
    assert_eq!(via_port.draft_payload, direct.draft_payload);
}

#[test]
fn mock_port_result_is_used_when_present() {
    let schema = get_form_schema("SVC001").unwrap();
    let result = run_form_fill(&MockPort, "SVC001", &MoveProfile::default(), &schema);
    assert_eq!(
        result.draft_payload["new_address_sgg"],
        Value::String("강남구".to_string())
    );
    assert_eq!(result.missing_fields.len(), 2);
}

#[test]
fn unknown_service_has_no_schema() {
    assert!(get_form_schema("SVC999").is_none());
    assert!(get_form_schema("SVC003").is_some());
}
