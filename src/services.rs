//! In-crate service catalogue and lookup.
//!
//! Stands in for the external service database: keyword/tag/region scoring
//! over a fixed record set, capped at five results.

use crate::planning::Route;
use serde::{Deserialize, Serialize};

const MAX_RESULTS: usize = 5;

/// One catalogue row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub service_id: String,
    pub service_name: String,
    pub route: Route,
    pub eligibility_summary: String,
    pub required_documents: Vec<String>,
    pub application_channel: Vec<String>,
    pub main_url: String,
    pub legal_basis: Vec<String>,
    pub contact: String,
    pub tags: Vec<String>,
    /// `"all"` means nationwide.
    pub target_region: String,
}

fn catalogue() -> Vec<ServiceRecord> {
    vec![
        ServiceRecord {
            service_id: "SVC001".to_string(),
            service_name: "전입신고".to_string(),
            route: Route::Gov24,
            eligibility_summary: "이사한 날로부터 14일 이내 신고".to_string(),
            required_documents: vec!["신분증".to_string()],
            application_channel: vec![
                "online".to_string(),
                "mobile".to_string(),
                "visit".to_string(),
            ],
            main_url: "https://www.gov.kr/portal/service/serviceInfo/PTR000050007".to_string(),
            legal_basis: vec!["주민등록법 제11조".to_string()],
            contact: "읍·면·동 행정복지센터".to_string(),
            tags: vec!["이사".to_string(), "전입".to_string(), "주소".to_string()],
            target_region: "all".to_string(),
        },
        ServiceRecord {
            service_id: "SVC002".to_string(),
            service_name: "건강보험 주소 변경".to_string(),
            route: Route::Gov24,
            eligibility_summary: "전입신고 후 자동 연동 또는 별도 신청".to_string(),
            required_documents: vec!["신분증".to_string()],
            application_channel: vec!["online".to_string(), "phone".to_string()],
            main_url: "https://www.nhis.or.kr".to_string(),
            legal_basis: Vec::new(),
            contact: "건강보험공단 1577-1000".to_string(),
            tags: vec!["이사".to_string(), "건강보험".to_string()],
            target_region: "all".to_string(),
        },
        ServiceRecord {
            service_id: "SVC003".to_string(),
            service_name: "차량 주소 변경".to_string(),
            route: Route::Gov24,
            eligibility_summary: "자동차 소유자의 주소 변경 후 30일 이내 변경등록".to_string(),
            required_documents: vec!["자동차등록증".to_string(), "신분증".to_string()],
            application_channel: vec!["online".to_string(), "visit".to_string()],
            main_url: "https://www.gov.kr/portal/service/serviceInfo/PTR000050202".to_string(),
            legal_basis: vec!["자동차관리법 제11조".to_string()],
            contact: "차량등록사업소".to_string(),
            tags: vec!["이사".to_string(), "차량".to_string()],
            target_region: "all".to_string(),
        },
        ServiceRecord {
            service_id: "SVC004".to_string(),
            service_name: "초·중학교 전학".to_string(),
            route: Route::LocalGov,
            eligibility_summary: "전입신고 완료 후 거주지 학교 배정 신청".to_string(),
            required_documents: vec!["전입신고 확인서".to_string()],
            application_channel: vec!["visit".to_string()],
            main_url: String::new(),
            legal_basis: vec!["초·중등교육법 시행령 제21조".to_string()],
            contact: "관할 교육지원청".to_string(),
            tags: vec!["이사".to_string(), "자녀".to_string(), "전학".to_string()],
            target_region: "all".to_string(),
        },
        ServiceRecord {
            service_id: "SVC005".to_string(),
            service_name: "대형폐기물 배출 신고".to_string(),
            route: Route::LocalGov,
            eligibility_summary: "이사 시 대형 생활폐기물 배출 전 신고".to_string(),
            required_documents: Vec::new(),
            application_channel: vec!["online".to_string(), "visit".to_string()],
            main_url: String::new(),
            legal_basis: Vec::new(),
            contact: "관할 구청 청소행정과".to_string(),
            tags: vec!["이사".to_string(), "폐기물".to_string()],
            target_region: "all".to_string(),
        },
    ]
}

/// Keyword/region/tag search over the catalogue, best matches first.
pub fn search_services(query: &str, _region: &str, tags: &[String]) -> Vec<ServiceRecord> {
    let mut scored: Vec<(i32, ServiceRecord)> = Vec::new();

    for record in catalogue() {
        let mut score = 0;

        if !query.is_empty() {
            let searchable = format!(
                "{} {} {}",
                record.service_name,
                record.tags.join(" "),
                record.eligibility_summary
            )
            .to_lowercase();
            if query
                .split_whitespace()
                .any(|q| searchable.contains(&q.to_lowercase()))
            {
                score += 2;
            }
        }

        score += tags.iter().filter(|t| record.tags.contains(t)).count() as i32;

        if record.target_region == "all" {
            score += 1;
        }

        if score > 0 || (query.is_empty() && tags.is_empty()) {
            scored.push((score, record));
        }
    }

    scored.sort_by_key(|(score, _)| std::cmp::Reverse(*score));
    scored
        .into_iter()
        .take(MAX_RESULTS)
        .map(|(_, record)| record)
        .collect()
}

/// Detail lookup by service id.
pub fn get_service_detail(service_id: &str) -> Option<ServiceRecord> {
    catalogue()
        .into_iter()
        .find(|record| record.service_id == service_id)
}
