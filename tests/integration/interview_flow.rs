use chrono::NaiveDate;
use movedesk::agents::{CompletionPort, CompletionRequest, Intent};
use movedesk::interview::{InterviewPlanner, MAX_FOLLOWUP_QUESTIONS};
use movedesk::profile::{Field, HouseholdType, MoveProfile};
use serde_json::{json, Value};

fn sufficient_profile() -> MoveProfile {
    let mut profile = MoveProfile::default();
    profile.move_date = Field::Known(NaiveDate::from_ymd_opt(2026, 8, 23).unwrap());
    profile.to_region.sido = Field::Known("서울특별시".to_string());
    profile.household_type = HouseholdType::Family;
    profile
}

#[test]
fn one_question_per_unknown_core_field_in_fixed_order() {
    let planner = InterviewPlanner::new();
    let questions = planner.questions(&MoveProfile::default());
    let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, ["move_date", "to_region.sido", "household_type"]);

    let mut partial = MoveProfile::default();
    partial.to_region.sido = Field::Known("경기도".to_string());
    let ids: Vec<String> = planner
        .questions(&partial)
        .into_iter()
        .map(|q| q.id)
        .collect();
    assert_eq!(ids, ["move_date", "household_type"]);
}

#[test]
fn no_questions_once_profile_is_sufficient() {
    let planner = InterviewPlanner::new();
    assert!(planner.questions(&sufficient_profile()).is_empty());
}

struct VerbosePort;

impl CompletionPort for VerbosePort {
    fn complete(&self, _request: &CompletionRequest) -> Option<Value> {
        let question = |id: &str| {
            json!({"id": id, "question": format!("{id}?"), "why": "", "options": [], "optional": false})
        };
        Some(json!({
            "questions": [
                question("move_date"),
                question("to_region.sido"),
                question("household_type"),
                question("is_rental"),
                question("vehicles.car"),
            ]
        }))
    }
}

struct SilentPort;

impl CompletionPort for SilentPort {
    fn complete(&self, _request: &CompletionRequest) -> Option<Value> {
        None
    }
}

#[test]
fn refine_caps_questions_and_skips_sufficient_profiles() {
    let planner = InterviewPlanner::new();

    let refined = planner
        .refine(&VerbosePort, &MoveProfile::default(), Intent::Move)
        .expect("refinement expected for an empty profile");
    assert_eq!(refined.len(), MAX_FOLLOWUP_QUESTIONS);

    assert!(planner
        .refine(&VerbosePort, &sufficient_profile(), Intent::Move)
        .is_none());
}

#[test]
fn failed_refinement_keeps_the_deterministic_list() {
    let planner = InterviewPlanner::new();
    assert!(planner
        .refine(&SilentPort, &MoveProfile::default(), Intent::Move)
        .is_none());
    // Callers fall back to the rule-based questions.
    assert_eq!(planner.questions(&MoveProfile::default()).len(), 3);
}
