//! Application form schemas and the draft-filling stage.
//!
//! The completion-backed filler is best effort: an empty result falls back
//! to a deterministic rule that copies known profile fields, leaves every
//! sensitive field null, and surfaces required-but-unfilled fields as
//! follow-up questions.

use crate::agents::{CompletionPort, CompletionRequest};
use crate::profile::{MoveProfile, Tenancy};
use crate::prompts;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub is_sensitive: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSchema {
    pub service_id: String,
    pub service_name: String,
    pub fields: Vec<FormField>,
}

impl FormSchema {
    pub fn sensitive_field_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.is_sensitive)
            .map(|f| f.name.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingField {
    pub field: String,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormFillResult {
    pub draft_payload: Map<String, Value>,
    #[serde(default)]
    pub missing_fields: Vec<MissingField>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

fn field(
    name: &str,
    label: &str,
    field_type: &str,
    required: bool,
    is_sensitive: bool,
    options: &[&str],
) -> FormField {
    FormField {
        name: name.to_string(),
        label: label.to_string(),
        field_type: field_type.to_string(),
        required,
        is_sensitive,
        options: options.iter().map(|s| s.to_string()).collect(),
    }
}

/// Form-field schema lookup.
pub fn get_form_schema(service_id: &str) -> Option<FormSchema> {
    match service_id {
        "SVC001" => Some(FormSchema {
            service_id: "SVC001".to_string(),
            service_name: "전입신고".to_string(),
            fields: vec![
                field("move_date", "이사 날짜", "date", true, false, &[]),
                field("new_address_sido", "새 주소 시/도", "string", true, false, &[]),
                field("new_address_sgg", "새 주소 시/군/구", "string", true, false, &[]),
                field(
                    "new_address_detail",
                    "새 주소 상세 (동/호수)",
                    "string",
                    true,
                    true,
                    &[],
                ),
                field("resident_number", "주민등록번호", "string", true, true, &[]),
                field(
                    "household_type",
                    "세대 유형",
                    "select",
                    true,
                    false,
                    &["단독세대", "가족세대", "세대합가"],
                ),
                field(
                    "is_rental",
                    "거주 형태",
                    "select",
                    false,
                    false,
                    &["전세", "월세", "자가"],
                ),
            ],
        }),
        "SVC003" => Some(FormSchema {
            service_id: "SVC003".to_string(),
            service_name: "차량 주소 변경".to_string(),
            fields: vec![
                field("car_number", "차량 번호", "string", true, false, &[]),
                field("owner_name", "소유자 이름", "string", true, false, &[]),
                field("new_address_sido", "새 주소 시/도", "string", true, false, &[]),
                field("new_address_sgg", "새 주소 시/군/구", "string", true, false, &[]),
                field("new_address_detail", "새 주소 상세", "string", true, true, &[]),
                field("resident_number", "주민등록번호", "string", true, true, &[]),
            ],
        }),
        _ => None,
    }
}

/// Fills a draft through the completion port, falling back to the
/// deterministic rule when the call yields nothing usable.
pub fn run_form_fill(
    port: &dyn CompletionPort,
    service_id: &str,
    profile: &MoveProfile,
    schema: &FormSchema,
) -> FormFillResult {
    let completion = serde_json::to_string(profile)
        .ok()
        .zip(serde_json::to_string(schema).ok())
        .and_then(|(profile_json, schema_json)| {
            let request = CompletionRequest {
                system_prompt: prompts::FORM_FILL_PROMPT,
                user_content: format!(
                    "service_id: {service_id}\nmove_profile: {profile_json}\nform_schema: {schema_json}"
                ),
                temperature: 0.1,
            };
            port.complete(&request)
        })
        .and_then(|value| serde_json::from_value::<FormFillResult>(value).ok())
        .filter(|result| !result.draft_payload.is_empty());

    match completion {
        Some(result) => result,
        None => fallback_fill(profile, schema),
    }
}

/// Rule-based filler: copy known profile fields into matching form fields,
/// null out every sensitive field, list required-but-unfilled fields.
pub fn fallback_fill(profile: &MoveProfile, schema: &FormSchema) -> FormFillResult {
    let mut draft_payload = Map::new();
    let mut missing_fields = Vec::new();
    let warnings = vec![
        "제출 전 반드시 내용을 확인하세요.".to_string(),
        "민감정보(주민번호, 상세주소)는 안전한 입력 단계에서만 입력하세요.".to_string(),
    ];

    for form_field in &schema.fields {
        let known_value = if form_field.is_sensitive {
            // Never auto-fill sensitive data.
            None
        } else {
            profile_value(profile, &form_field.name)
        };

        match known_value {
            Some(value) => {
                draft_payload.insert(form_field.name.clone(), value);
            }
            None => {
                draft_payload.insert(form_field.name.clone(), Value::Null);
                if form_field.required && !form_field.is_sensitive {
                    missing_fields.push(MissingField {
                        field: form_field.name.clone(),
                        question: format!("{}을(를) 입력해주세요.", form_field.label),
                        options: form_field.options.clone(),
                    });
                }
            }
        }
    }

    FormFillResult {
        draft_payload,
        missing_fields,
        warnings,
    }
}

fn profile_value(profile: &MoveProfile, field_name: &str) -> Option<Value> {
    match field_name {
        "move_date" => profile
            .move_date
            .as_known()
            .map(|date| Value::String(date.to_string())),
        "new_address_sido" => profile
            .to_region
            .sido
            .as_known()
            .map(|sido| Value::String(sido.clone())),
        "new_address_sgg" => profile
            .to_region
            .sgg
            .as_known()
            .map(|sgg| Value::String(sgg.clone())),
        "household_type" => profile
            .household_type
            .is_known()
            .then(|| Value::String(profile.household_type.label().to_string())),
        "is_rental" => match profile.is_rental {
            Tenancy::Unknown => None,
            Tenancy::Rental => Some(Value::String("rental".to_string())),
            Tenancy::Owner => Some(Value::String("owner".to_string())),
        },
        _ => None,
    }
}
