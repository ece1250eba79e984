//! Pre-filter applied to every inbound message before any other stage runs.
//!
//! Purely regex-local so an obviously unsafe message never costs a paid
//! completion round-trip.

use crate::audit::{AuditEvent, AuditKind};
use regex::Regex;

/// Outcome of screening one inbound message. Exactly one audit event is
/// produced per invocation.
#[derive(Debug, Clone)]
pub struct SafetyVerdict {
    pub block: bool,
    pub block_reason: Option<String>,
    pub block_submit: bool,
    pub requires_hitl: bool,
    pub sensitive_type: Option<String>,
    pub audit_event: AuditEvent,
}

pub struct SafetyGate {
    pii_patterns: Vec<(Regex, &'static str)>,
    force_submit: Regex,
}

impl SafetyGate {
    pub fn new() -> Self {
        let pii_patterns = vec![
            (
                Regex::new(r"\d{6}-[1-4]\d{6}").expect("resident number pattern"),
                "주민등록번호",
            ),
            (
                Regex::new(r"\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}").expect("card pattern"),
                "카드번호",
            ),
            (
                Regex::new(r"\d{10,14}").expect("account pattern"),
                "계좌번호 의심",
            ),
        ];
        let force_submit =
            Regex::new(r"바로\s*제출|확인\s*없이|그냥\s*접수|즉시\s*신청|바로\s*신청|바로\s*접수")
                .expect("force submit pattern");
        Self {
            pii_patterns,
            force_submit,
        }
    }

    /// Screens a message. Precedence is strict: the first matching PII
    /// pattern blocks and nothing further is checked; otherwise coercive
    /// submission phrasing forces the HITL gate; otherwise pass-through.
    pub fn evaluate(&self, message: &str) -> SafetyVerdict {
        for (pattern, label) in &self.pii_patterns {
            if pattern.is_match(message) {
                return SafetyVerdict {
                    block: true,
                    block_reason: Some(format!(
                        "{label}이(가) 감지되었습니다. 민감정보는 채팅에 입력하지 마세요."
                    )),
                    block_submit: false,
                    requires_hitl: false,
                    sensitive_type: Some(label.to_string()),
                    audit_event: AuditEvent::new(
                        AuditKind::SafetyBlock,
                        format!("민감정보 감지됨: {label}"),
                    ),
                };
            }
        }

        if self.force_submit.is_match(message) {
            return SafetyVerdict {
                block: false,
                block_reason: None,
                block_submit: true,
                requires_hitl: true,
                sensitive_type: None,
                audit_event: AuditEvent::new(
                    AuditKind::HitlGate,
                    "사용자가 확인 없이 즉시 제출을 요청함 → HITL 강제",
                ),
            };
        }

        SafetyVerdict {
            block: false,
            block_reason: None,
            block_submit: false,
            requires_hitl: false,
            sensitive_type: None,
            audit_event: AuditEvent::new(AuditKind::StateUpdate, "안전 검사 통과 (정규식 필터)"),
        }
    }
}

impl Default for SafetyGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resident_number_wins_over_account_pattern() {
        let gate = SafetyGate::new();
        let verdict = gate.evaluate("제 번호는 900101-1234567 이에요");
        assert!(verdict.block);
        assert_eq!(verdict.sensitive_type.as_deref(), Some("주민등록번호"));
        assert_eq!(verdict.audit_event.event_type, AuditKind::SafetyBlock);
    }

    #[test]
    fn bare_digit_run_blocks_as_suspected_account() {
        let gate = SafetyGate::new();
        let verdict = gate.evaluate("9001011234567");
        assert!(verdict.block);
        assert_eq!(verdict.sensitive_type.as_deref(), Some("계좌번호 의심"));
    }

    #[test]
    fn coercive_submission_forces_hitl_without_blocking() {
        let gate = SafetyGate::new();
        let verdict = gate.evaluate("그냥 접수해 주세요");
        assert!(!verdict.block);
        assert!(verdict.block_submit);
        assert!(verdict.requires_hitl);
        assert_eq!(verdict.audit_event.event_type, AuditKind::HitlGate);
    }
}
