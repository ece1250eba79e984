//! Locale-specific tables and disambiguation rules for profile extraction.
//!
//! Everything language-dependent lives here as injected configuration so
//! other regions can supply their own tables without touching the extractor.

use crate::profile::HouseholdType;
use regex::Regex;

/// How a matched region keyword reads in context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionRole {
    Source,
    Destination,
    Ambiguous,
}

/// Keyword tables and postposition markers for one locale.
pub struct ExtractionRules {
    /// Province keyword → canonical province name, in match-priority order.
    pub provinces: Vec<(String, String)>,
    /// District keyword → (canonical district, province it belongs to).
    pub districts: Vec<(String, String, String)>,
    /// Single characters skipped between a region keyword and its
    /// postposition (administrative suffixes such as 도/시/군/구).
    pub region_suffixes: String,
    /// Postpositions marking the keyword as the origin of the move.
    pub source_markers: Vec<String>,
    /// Postpositions marking the keyword as the destination.
    pub destination_markers: Vec<String>,
    /// Characters that end a word; a bare keyword followed by one of these
    /// (or end of text) is read as a destination.
    pub word_delimiters: String,
    /// Relative date words → days before "today".
    pub relative_dates: Vec<(String, i64)>,
    /// Full `YYYY-MM-DD`-like pattern (also 년/월/일 forms).
    pub absolute_date: Regex,
    /// Two-component `M월 D일` fallback, resolved with the current year.
    pub month_day: Regex,
    /// Household keyword sets, first matching category wins.
    pub household_rules: Vec<(Vec<String>, HouseholdType)>,
    /// Any of these marks the household as having children.
    pub children_markers: Vec<String>,
    /// Any of these marks car ownership.
    pub car_markers: Vec<String>,
    /// Draft-intent keywords that route a turn into the drafting stage.
    pub draft_markers: Vec<String>,
}

impl ExtractionRules {
    /// Classifies the postposition immediately following `keyword` in
    /// `message`. An administrative suffix character right after the keyword
    /// is skipped before inspection.
    pub fn classify_region_role(&self, message: &str, keyword: &str) -> RegionRole {
        let Some(idx) = message.find(keyword) else {
            return RegionRole::Ambiguous;
        };
        let mut after = &message[idx + keyword.len()..];
        if let Some(first) = after.chars().next() {
            if self.region_suffixes.contains(first) {
                after = &after[first.len_utf8()..];
            }
        }
        for marker in &self.source_markers {
            if after.starts_with(marker.as_str()) {
                return RegionRole::Source;
            }
        }
        for marker in &self.destination_markers {
            if after.starts_with(marker.as_str()) {
                return RegionRole::Destination;
            }
        }
        match after.chars().next() {
            None => RegionRole::Destination,
            Some(c) if self.word_delimiters.contains(c) => RegionRole::Destination,
            Some(_) => RegionRole::Ambiguous,
        }
    }

    pub fn wants_draft(&self, message: &str) -> bool {
        self.draft_markers.iter().any(|k| message.contains(k.as_str()))
    }

    /// Default Korean ruleset.
    pub fn korean() -> Self {
        let provinces = [
            ("서울", "서울특별시"),
            ("부산", "부산광역시"),
            ("인천", "인천광역시"),
            ("대구", "대구광역시"),
            ("광주", "광주광역시"),
            ("대전", "대전광역시"),
            ("울산", "울산광역시"),
            ("세종", "세종특별자치시"),
            ("경기", "경기도"),
            ("강원", "강원도"),
            ("충북", "충청북도"),
            ("충남", "충청남도"),
            ("전북", "전라북도"),
            ("전남", "전라남도"),
            ("경북", "경상북도"),
            ("경남", "경상남도"),
            ("제주", "제주특별자치도"),
        ];
        let districts = [
            // 서울 25개 구
            ("강남구", "강남구", "서울특별시"),
            ("강동구", "강동구", "서울특별시"),
            ("강북구", "강북구", "서울특별시"),
            ("강서구", "강서구", "서울특별시"),
            ("관악구", "관악구", "서울특별시"),
            ("광진구", "광진구", "서울특별시"),
            ("구로구", "구로구", "서울특별시"),
            ("금천구", "금천구", "서울특별시"),
            ("노원구", "노원구", "서울특별시"),
            ("도봉구", "도봉구", "서울특별시"),
            ("동대문구", "동대문구", "서울특별시"),
            ("동작구", "동작구", "서울특별시"),
            ("마포구", "마포구", "서울특별시"),
            ("서대문구", "서대문구", "서울특별시"),
            ("서초구", "서초구", "서울특별시"),
            ("성동구", "성동구", "서울특별시"),
            ("성북구", "성북구", "서울특별시"),
            ("송파구", "송파구", "서울특별시"),
            ("양천구", "양천구", "서울특별시"),
            ("영등포구", "영등포구", "서울특별시"),
            ("용산구", "용산구", "서울특별시"),
            ("은평구", "은평구", "서울특별시"),
            ("종로구", "종로구", "서울특별시"),
            ("중구", "중구", "서울특별시"),
            ("중랑구", "중랑구", "서울특별시"),
            // 부산 주요 구
            ("해운대구", "해운대구", "부산광역시"),
            ("부산진구", "부산진구", "부산광역시"),
            ("동래구", "동래구", "부산광역시"),
            ("남구", "남구", "부산광역시"),
            ("북구", "북구", "부산광역시"),
            ("사하구", "사하구", "부산광역시"),
            ("금정구", "금정구", "부산광역시"),
            ("연제구", "연제구", "부산광역시"),
            ("수영구", "수영구", "부산광역시"),
            ("사상구", "사상구", "부산광역시"),
            ("기장군", "기장군", "부산광역시"),
            // 인천 주요 구
            ("미추홀구", "미추홀구", "인천광역시"),
            ("연수구", "연수구", "인천광역시"),
            ("남동구", "남동구", "인천광역시"),
            ("부평구", "부평구", "인천광역시"),
            ("계양구", "계양구", "인천광역시"),
            ("강화군", "강화군", "인천광역시"),
            ("옹진군", "옹진군", "인천광역시"),
            // 대구 주요 구
            ("달서구", "달서구", "대구광역시"),
            ("달성군", "달성군", "대구광역시"),
            ("수성구", "수성구", "대구광역시"),
            // 경기 주요 시/군
            ("수원시", "수원시", "경기도"),
            ("성남시", "성남시", "경기도"),
            ("용인시", "용인시", "경기도"),
            ("부천시", "부천시", "경기도"),
            ("안산시", "안산시", "경기도"),
            ("안양시", "안양시", "경기도"),
            ("남양주시", "남양주시", "경기도"),
            ("화성시", "화성시", "경기도"),
            ("평택시", "평택시", "경기도"),
            ("의정부시", "의정부시", "경기도"),
            ("시흥시", "시흥시", "경기도"),
            ("파주시", "파주시", "경기도"),
            ("광명시", "광명시", "경기도"),
            ("김포시", "김포시", "경기도"),
            ("군포시", "군포시", "경기도"),
            ("하남시", "하남시", "경기도"),
            ("오산시", "오산시", "경기도"),
            ("이천시", "이천시", "경기도"),
            ("안성시", "안성시", "경기도"),
            ("구리시", "구리시", "경기도"),
            ("의왕시", "의왕시", "경기도"),
            ("양주시", "양주시", "경기도"),
            ("포천시", "포천시", "경기도"),
            ("고양시", "고양시", "경기도"),
            ("광주시", "광주시", "경기도"),
            // 시 이름 없이 쓰이는 지역명
            ("판교", "성남시", "경기도"),
            ("분당", "성남시", "경기도"),
            ("일산", "고양시", "경기도"),
            ("동탄", "화성시", "경기도"),
            ("수지", "용인시", "경기도"),
            ("광교", "수원시", "경기도"),
            ("검단", "인천광역시", "인천광역시"),
            // 충청/전라/경상 주요 시
            ("청주시", "청주시", "충청북도"),
            ("천안시", "천안시", "충청남도"),
            ("전주시", "전주시", "전라북도"),
            ("창원시", "창원시", "경상남도"),
            ("진주시", "진주시", "경상남도"),
            ("포항시", "포항시", "경상북도"),
            ("경주시", "경주시", "경상북도"),
        ];
        Self {
            provinces: provinces
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            districts: districts
                .iter()
                .map(|(k, sgg, sido)| (k.to_string(), sgg.to_string(), sido.to_string()))
                .collect(),
            region_suffixes: "도시군구".to_string(),
            source_markers: vec!["에서".to_string()],
            destination_markers: vec!["으로".to_string(), "로".to_string(), "에".to_string()],
            word_delimiters: " ,.!".to_string(),
            relative_dates: vec![
                ("오늘".to_string(), 0),
                ("어제".to_string(), 1),
                ("그저께".to_string(), 2),
                ("그제".to_string(), 2),
            ],
            absolute_date: Regex::new(r"(\d{4})[년\-/]?\s*(\d{1,2})[월\-/]?\s*(\d{1,2})일?")
                .expect("absolute date pattern"),
            month_day: Regex::new(r"(\d{1,2})[월\-/]\s*(\d{1,2})일?").expect("month-day pattern"),
            household_rules: vec![
                (
                    vec![
                        "혼자".to_string(),
                        "1인".to_string(),
                        "싱글".to_string(),
                        "나 혼자".to_string(),
                        "1인 가구".to_string(),
                    ],
                    HouseholdType::Single,
                ),
                (
                    vec![
                        "신혼".to_string(),
                        "신혼부부".to_string(),
                        "부부".to_string(),
                        "가족".to_string(),
                        "세대".to_string(),
                        "아내".to_string(),
                        "남편".to_string(),
                        "아이".to_string(),
                        "자녀".to_string(),
                        "4인".to_string(),
                        "3인".to_string(),
                        "5인".to_string(),
                    ],
                    HouseholdType::Family,
                ),
                (vec!["기타".to_string()], HouseholdType::Single),
            ],
            children_markers: vec![
                "아이".to_string(),
                "자녀".to_string(),
                "아들".to_string(),
                "딸".to_string(),
                "초등".to_string(),
                "학교".to_string(),
            ],
            car_markers: vec![
                "차".to_string(),
                "자동차".to_string(),
                "차량".to_string(),
            ],
            draft_markers: vec![
                "초안".to_string(),
                "신청서".to_string(),
                "전입신고".to_string(),
                "만들어".to_string(),
                "작성".to_string(),
                "신청".to_string(),
            ],
        }
    }
}
