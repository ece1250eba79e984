//! Canned completion results for deterministic demos and tests.

use super::{CompletionPort, CompletionRequest};
use crate::prompts;
use chrono::{Duration, Utc};
use serde_json::{json, Value};

/// Substitutes a fixed output for every completion call, keyed off the
/// agent's system prompt. Used when `mock_mode` is set.
pub struct MockPort;

impl CompletionPort for MockPort {
    fn complete(&self, request: &CompletionRequest) -> Option<Value> {
        if request.system_prompt == prompts::TRIAGE_PROMPT {
            return Some(json!({
                "intent": "move",
                "confidence": 1.0,
                "sensitive": false,
                "notes": "mock"
            }));
        }
        if request.system_prompt == prompts::INTERVIEW_PROMPT {
            return Some(json!({
                "questions": [
                    {"id": "move_date", "question": "이사 날짜는 언제인가요?",
                     "why": "필수 정보", "options": [], "optional": false},
                    {"id": "to_region.sido", "question": "어느 시/도로 이사하셨나요?",
                     "why": "필수 정보",
                     "options": ["서울특별시", "경기도", "부산광역시"], "optional": false},
                    {"id": "household_type", "question": "세대 구성은 어떻게 되시나요?",
                     "why": "필수 정보",
                     "options": ["1인 가구", "가족", "부부"], "optional": false}
                ]
            }));
        }
        if request.system_prompt == prompts::FORM_FILL_PROMPT {
            let yesterday = (Utc::now().date_naive() - Duration::days(1)).to_string();
            return Some(json!({
                "draft_payload": {
                    "move_date": yesterday,
                    "new_address_sido": "서울특별시",
                    "new_address_sgg": "강남구",
                    "new_address_detail": null,
                    "resident_number": null,
                    "household_type": "가족세대",
                    "is_rental": null
                },
                "missing_fields": [
                    {"field": "new_address_detail", "question": "상세 주소를 입력해 주세요.", "options": []},
                    {"field": "resident_number", "question": "주민등록번호를 입력해 주세요.", "options": []}
                ],
                "warnings": [
                    "제출 전 반드시 내용을 확인하세요.",
                    "민감정보는 안전한 입력 단계에서만 입력하세요."
                ]
            }));
        }
        None
    }
}
