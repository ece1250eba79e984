//! Outstanding-question planning for the profile interview.

use crate::agents::{CompletionPort, CompletionRequest, Intent};
use crate::profile::MoveProfile;
use crate::prompts;
use serde::{Deserialize, Serialize};

/// Cap on completion-generated follow-ups, bounding conversational turns and
/// token cost.
pub const MAX_FOLLOWUP_QUESTIONS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextQuestion {
    pub id: String,
    pub question: String,
    pub why: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub optional: bool,
}

/// Computes the minimal set of outstanding questions. Deterministic: one
/// question per still-unknown core field, in a fixed order, no external call.
pub struct InterviewPlanner;

impl InterviewPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Empty iff the profile is sufficient.
    pub fn questions(&self, profile: &MoveProfile) -> Vec<NextQuestion> {
        let mut questions = Vec::new();

        if !profile.move_date.is_known() {
            questions.push(NextQuestion {
                id: "move_date".to_string(),
                question: "이사 날짜가 언제인가요?".to_string(),
                why: "신고 기한(전입신고는 이사 후 14일 이내)을 계산합니다.".to_string(),
                options: ["오늘", "어제", "그저께", "이번 주"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                optional: false,
            });
        }

        if !profile.to_region.sido.is_known() {
            questions.push(NextQuestion {
                id: "to_region.sido".to_string(),
                question: "어느 시/도로 이사하셨나요?".to_string(),
                why: "이사 목적지에 맞는 서비스를 안내해 드립니다.".to_string(),
                options: [
                    "서울특별시",
                    "경기도",
                    "부산광역시",
                    "인천광역시",
                    "대구광역시",
                    "광주광역시",
                    "대전광역시",
                    "울산광역시",
                    "세종특별자치시",
                    "강원도",
                    "충청북도",
                    "충청남도",
                    "전라북도",
                    "전라남도",
                    "경상북도",
                    "경상남도",
                    "제주특별자치도",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
                optional: false,
            });
        }

        if !profile.household_type.is_known() {
            questions.push(NextQuestion {
                id: "household_type".to_string(),
                question: "어떤 유형의 가구이신가요?".to_string(),
                why: "가구 유형에 따라 필요한 행정 서비스가 달라집니다.".to_string(),
                options: ["1인 가구", "신혼부부", "자녀 있는 가족", "기타"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                optional: false,
            });
        }

        questions
    }

    /// Completion-backed variant for open-ended follow-up. The result is
    /// truncated to [`MAX_FOLLOWUP_QUESTIONS`]; an empty or failed completion
    /// yields `None` so callers keep the deterministic list.
    pub fn refine(
        &self,
        port: &dyn CompletionPort,
        profile: &MoveProfile,
        intent: Intent,
    ) -> Option<Vec<NextQuestion>> {
        if profile.is_sufficient() {
            return None;
        }
        let profile_json = serde_json::to_string(profile).ok()?;
        let request = CompletionRequest {
            system_prompt: prompts::INTERVIEW_PROMPT,
            user_content: format!("intent: {}\nmove_profile: {}", intent.as_str(), profile_json),
            temperature: 0.3,
        };
        let value = port.complete(&request)?;
        let mut questions: Vec<NextQuestion> =
            serde_json::from_value(value.get("questions")?.clone()).ok()?;
        if questions.is_empty() {
            return None;
        }
        questions.truncate(MAX_FOLLOWUP_QUESTIONS);
        Some(questions)
    }
}

impl Default for InterviewPlanner {
    fn default() -> Self {
        Self::new()
    }
}
