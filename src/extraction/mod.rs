//! Deterministic profile extraction from free-text messages.
//!
//! The extractor proposes a value only for fields the profile does not know
//! yet, which is where the monotonicity invariant is enforced; the merge in
//! [`crate::profile`] stays a plain structural merge.

pub mod locale;

pub use locale::{ExtractionRules, RegionRole};

use crate::profile::{
    HouseholdType, MoveProfile, ProfilePatch, RegionPatch, TriState, VehiclesPatch,
};
use chrono::{Datelike, Duration, NaiveDate};

pub struct ProfileExtractor {
    rules: ExtractionRules,
}

impl ProfileExtractor {
    pub fn new(rules: ExtractionRules) -> Self {
        Self { rules }
    }

    pub fn korean() -> Self {
        Self::new(ExtractionRules::korean())
    }

    pub fn rules(&self) -> &ExtractionRules {
        &self.rules
    }

    /// Infers facts from `message`, producing a sparse patch. Fields already
    /// known on `profile` are never proposed. `today` anchors relative dates.
    pub fn extract(&self, message: &str, profile: &MoveProfile, today: NaiveDate) -> ProfilePatch {
        let mut patch = ProfilePatch::default();

        if !profile.move_date.is_known() {
            patch.move_date = self.extract_date(message, today);
        }

        let mut detected_sido: Option<String> = None;
        if !profile.to_region.sido.is_known() {
            detected_sido = self.extract_destination_sido(message);
            if let Some(sido) = &detected_sido {
                patch.to_region = Some(RegionPatch {
                    sido: Some(sido.clone()),
                    sgg: None,
                });
            }
        }

        if !profile.to_region.sgg.is_known() {
            if let Some((sgg, inferred_sido)) = self.extract_destination_sgg(message) {
                let region = patch.to_region.get_or_insert_with(RegionPatch::default);
                region.sgg = Some(sgg);
                // Back-infer the province from the district when it is still
                // unknown on both the profile and this patch.
                if region.sido.is_none()
                    && detected_sido.is_none()
                    && !profile.to_region.sido.is_known()
                {
                    region.sido = Some(inferred_sido);
                }
            }
        }

        if !profile.household_type.is_known() {
            patch.household_type = self.extract_household(message);
        }

        if !profile.has_children.is_known()
            && self
                .rules
                .children_markers
                .iter()
                .any(|k| message.contains(k.as_str()))
        {
            patch.has_children = Some(TriState::Yes);
        }

        if !profile.vehicles.car.is_known()
            && self
                .rules
                .car_markers
                .iter()
                .any(|k| message.contains(k.as_str()))
        {
            patch.vehicles = Some(VehiclesPatch {
                car: Some(TriState::Yes),
                ..Default::default()
            });
        }

        patch
    }

    fn extract_date(&self, message: &str, today: NaiveDate) -> Option<NaiveDate> {
        for (word, days_ago) in &self.rules.relative_dates {
            if message.contains(word.as_str()) {
                return Some(today - Duration::days(*days_ago));
            }
        }
        if let Some(caps) = self.rules.absolute_date.captures(message) {
            let year: i32 = caps[1].parse().ok()?;
            let month: u32 = caps[2].parse().ok()?;
            let day: u32 = caps[3].parse().ok()?;
            return NaiveDate::from_ymd_opt(year, month, day);
        }
        if let Some(caps) = self.rules.month_day.captures(message) {
            let month: u32 = caps[1].parse().ok()?;
            let day: u32 = caps[2].parse().ok()?;
            return NaiveDate::from_ymd_opt(today.year(), month, day);
        }
        None
    }

    /// Prefer a keyword unambiguously marked as destination; fall back to
    /// the first match that is not explicitly source-marked.
    fn extract_destination_sido(&self, message: &str) -> Option<String> {
        for (keyword, sido) in &self.rules.provinces {
            if message.contains(keyword.as_str())
                && self.rules.classify_region_role(message, keyword) == RegionRole::Destination
            {
                return Some(sido.clone());
            }
        }
        for (keyword, sido) in &self.rules.provinces {
            if message.contains(keyword.as_str())
                && self.rules.classify_region_role(message, keyword) != RegionRole::Source
            {
                return Some(sido.clone());
            }
        }
        None
    }

    fn extract_destination_sgg(&self, message: &str) -> Option<(String, String)> {
        for (keyword, sgg, sido) in &self.rules.districts {
            if message.contains(keyword.as_str())
                && self.rules.classify_region_role(message, keyword) == RegionRole::Destination
            {
                return Some((sgg.clone(), sido.clone()));
            }
        }
        for (keyword, sgg, sido) in &self.rules.districts {
            if message.contains(keyword.as_str())
                && self.rules.classify_region_role(message, keyword) != RegionRole::Source
            {
                return Some((sgg.clone(), sido.clone()));
            }
        }
        None
    }

    fn extract_household(&self, message: &str) -> Option<HouseholdType> {
        for (keywords, household) in &self.rules.household_rules {
            if keywords.iter().any(|k| message.contains(k.as_str())) {
                return Some(*household);
            }
        }
        None
    }
}
