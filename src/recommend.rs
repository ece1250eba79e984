//! Evidence-backed service recommendations.

use crate::planning::Route;
use crate::profile::{MoveProfile, TriState};
use crate::services::ServiceRecord;
use serde::{Deserialize, Serialize};

/// Reference tracing a recommendation back to a lookup-database result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCard {
    pub service_id: String,
    pub service_name: String,
    pub route: Route,
    #[serde(default)]
    pub why_recommended: Vec<String>,
    #[serde(default)]
    pub eligibility_summary: String,
    #[serde(default)]
    pub required_documents: Vec<String>,
    #[serde(default)]
    pub application_channel: Vec<String>,
    #[serde(default)]
    pub main_url: String,
    #[serde(default)]
    pub legal_basis: Vec<String>,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub evidence: Vec<EvidenceRef>,
}

impl ServiceCard {
    /// A card never ships unevidenced: when no explicit reference exists,
    /// one is synthesized from the card's own fields.
    pub fn ensure_evidence(&mut self) {
        if !self.evidence.is_empty() {
            return;
        }
        if !self.main_url.is_empty() {
            self.evidence.push(EvidenceRef {
                kind: "db_field".to_string(),
                key: "main_url".to_string(),
                value: self.main_url.clone(),
            });
        } else if let Some(basis) = self.legal_basis.first() {
            self.evidence.push(EvidenceRef {
                kind: "db_field".to_string(),
                key: "legal_basis".to_string(),
                value: basis.clone(),
            });
        } else {
            self.evidence.push(EvidenceRef {
                kind: "db_field".to_string(),
                key: "service_id".to_string(),
                value: self.service_id.clone(),
            });
        }
    }
}

/// Tag set derived from the profile, used both for lookup and for phrasing
/// recommendation reasons.
pub fn profile_tags(profile: &MoveProfile) -> Vec<String> {
    let mut tags = vec!["이사".to_string()];
    if profile.has_children == TriState::Yes {
        tags.push("자녀".to_string());
    }
    if profile.vehicles.car == TriState::Yes {
        tags.push("차량".to_string());
    }
    tags
}

/// Builds cards from lookup results. Deterministic; runs once per session.
pub fn build_service_cards(profile: &MoveProfile, db_results: &[ServiceRecord]) -> Vec<ServiceCard> {
    db_results
        .iter()
        .map(|record| {
            let mut why = Vec::new();
            if !record.eligibility_summary.is_empty() {
                why.push(record.eligibility_summary.clone());
            }
            if profile.has_children == TriState::Yes && record.tags.iter().any(|t| t == "자녀") {
                why.push("자녀가 있는 가구에 필요한 절차입니다.".to_string());
            }
            if profile.vehicles.car == TriState::Yes && record.tags.iter().any(|t| t == "차량") {
                why.push("차량 보유 가구는 주소 변경등록이 필요합니다.".to_string());
            }
            let mut card = ServiceCard {
                service_id: record.service_id.clone(),
                service_name: record.service_name.clone(),
                route: record.route,
                why_recommended: why,
                eligibility_summary: record.eligibility_summary.clone(),
                required_documents: record.required_documents.clone(),
                application_channel: record.application_channel.clone(),
                main_url: record.main_url.clone(),
                legal_basis: record.legal_basis.clone(),
                contact: record.contact.clone(),
                evidence: Vec::new(),
            };
            card.ensure_evidence();
            card
        })
        .collect()
}
