//! Accumulated-knowledge model for a single move.
//!
//! Every scalar carries an explicit "unknown" state distinct from any valid
//! value. Once a field leaves `Unknown` it is never overwritten by inference;
//! the extractor checks the current value before proposing a patch key, and
//! `merge_patch` itself stays a plain structural merge.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that may still be uncollected.
///
/// Serialized as the literal string `"unknown"` or the inner value, matching
/// the persisted profile layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Unknown,
    Known(T),
}

// Manual impl: the derive would demand `T: Default`.
impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Unknown
    }
}

impl<T> Field<T> {
    pub fn is_known(&self) -> bool {
        matches!(self, Field::Known(_))
    }

    pub fn as_known(&self) -> Option<&T> {
        match self {
            Field::Known(value) => Some(value),
            Field::Unknown => None,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Unknown => serializer.serialize_str("unknown"),
            Field::Known(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.is_null() || value.as_str() == Some("unknown") {
            return Ok(Field::Unknown);
        }
        let inner = T::deserialize(value).map_err(serde::de::Error::custom)?;
        Ok(Field::Known(inner))
    }
}

/// Yes/no facts that start out uncollected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    #[default]
    Unknown,
    Yes,
    No,
}

impl TriState {
    pub fn is_known(&self) -> bool {
        !matches!(self, TriState::Unknown)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseholdType {
    #[default]
    Unknown,
    Single,
    Family,
}

impl HouseholdType {
    pub fn is_known(&self) -> bool {
        !matches!(self, HouseholdType::Unknown)
    }

    pub fn label(&self) -> &'static str {
        match self {
            HouseholdType::Unknown => "unknown",
            HouseholdType::Single => "single",
            HouseholdType::Family => "family",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tenancy {
    #[default]
    Unknown,
    Rental,
    Owner,
}

impl Tenancy {
    pub fn is_known(&self) -> bool {
        !matches!(self, Tenancy::Unknown)
    }
}

/// Two-level administrative region: province-level (sido) and district-level
/// (sgg) units, each independently unknown-able.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    #[serde(default)]
    pub sido: Field<String>,
    #[serde(default)]
    pub sgg: Field<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicles {
    #[serde(default)]
    pub car: TriState,
    #[serde(default)]
    pub motorcycle: TriState,
    #[serde(default)]
    pub pm: TriState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Needs {
    #[serde(default)]
    pub school_transfer: TriState,
    #[serde(default)]
    pub childcare: TriState,
    #[serde(default)]
    pub parking: TriState,
    #[serde(default)]
    pub waste_disposal: TriState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Consent {
    #[serde(default)]
    pub admin_info_query: bool,
    #[serde(default)]
    pub notifications: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskFlags {
    #[serde(default)]
    pub sensitive_info_detected: bool,
    #[serde(default)]
    pub user_asking_to_submit_without_review: bool,
}

/// The aggregate of everything the pipeline knows about one move.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveProfile {
    #[serde(default)]
    pub move_date: Field<NaiveDate>,
    #[serde(default)]
    pub from_region: Region,
    #[serde(default)]
    pub to_region: Region,
    #[serde(default)]
    pub household_type: HouseholdType,
    #[serde(default)]
    pub is_rental: Tenancy,
    #[serde(default)]
    pub has_children: TriState,
    #[serde(default)]
    pub vehicles: Vehicles,
    #[serde(default)]
    pub needs: Needs,
    #[serde(default)]
    pub consent: Consent,
    #[serde(default)]
    pub risk_flags: RiskFlags,
}

impl MoveProfile {
    /// Minimum fact set required before planning may begin.
    pub fn known_core_fields(&self) -> u32 {
        let mut known = 0;
        if self.move_date.is_known() {
            known += 1;
        }
        if self.to_region.sido.is_known() {
            known += 1;
        }
        if self.household_type.is_known() {
            known += 1;
        }
        known
    }

    pub fn is_sufficient(&self) -> bool {
        self.known_core_fields() >= 3
    }

    pub fn meets_threshold(&self, min_fields: u32) -> bool {
        self.known_core_fields() >= min_fields.min(3)
    }

    /// Structural merge of a sparse patch: nested structs merge key-by-key,
    /// scalars overwrite. Applying the same patch twice is a no-op.
    pub fn merge_patch(&self, patch: &ProfilePatch) -> MoveProfile {
        let mut merged = self.clone();
        if let Some(date) = patch.move_date {
            merged.move_date = Field::Known(date);
        }
        if let Some(region) = &patch.from_region {
            merge_region(&mut merged.from_region, region);
        }
        if let Some(region) = &patch.to_region {
            merge_region(&mut merged.to_region, region);
        }
        if let Some(household) = patch.household_type {
            merged.household_type = household;
        }
        if let Some(tenancy) = patch.is_rental {
            merged.is_rental = tenancy;
        }
        if let Some(children) = patch.has_children {
            merged.has_children = children;
        }
        if let Some(vehicles) = &patch.vehicles {
            merge_tri(&mut merged.vehicles.car, vehicles.car);
            merge_tri(&mut merged.vehicles.motorcycle, vehicles.motorcycle);
            merge_tri(&mut merged.vehicles.pm, vehicles.pm);
        }
        if let Some(needs) = &patch.needs {
            merge_tri(&mut merged.needs.school_transfer, needs.school_transfer);
            merge_tri(&mut merged.needs.childcare, needs.childcare);
            merge_tri(&mut merged.needs.parking, needs.parking);
            merge_tri(&mut merged.needs.waste_disposal, needs.waste_disposal);
        }
        if let Some(consent) = &patch.consent {
            if let Some(value) = consent.admin_info_query {
                merged.consent.admin_info_query = value;
            }
            if let Some(value) = consent.notifications {
                merged.consent.notifications = value;
            }
        }
        if let Some(flags) = &patch.risk_flags {
            if let Some(value) = flags.sensitive_info_detected {
                merged.risk_flags.sensitive_info_detected = value;
            }
            if let Some(value) = flags.user_asking_to_submit_without_review {
                merged.risk_flags.user_asking_to_submit_without_review = value;
            }
        }
        merged
    }
}

fn merge_region(target: &mut Region, patch: &RegionPatch) {
    if let Some(sido) = &patch.sido {
        target.sido = Field::Known(sido.clone());
    }
    if let Some(sgg) = &patch.sgg {
        target.sgg = Field::Known(sgg.clone());
    }
}

fn merge_tri(target: &mut TriState, patch: Option<TriState>) {
    if let Some(value) = patch {
        *target = value;
    }
}

/// Sparse patch over [`MoveProfile`]. `None` leaves the target untouched;
/// nested patches merge recursively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_region: Option<RegionPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_region: Option<RegionPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_type: Option<HouseholdType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_rental: Option<Tenancy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_children: Option<TriState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicles: Option<VehiclesPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs: Option<NeedsPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent: Option<ConsentPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_flags: Option<RiskFlagsPatch>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self == &ProfilePatch::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sido: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sgg: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VehiclesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car: Option<TriState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motorcycle: Option<TriState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm: Option<TriState>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NeedsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_transfer: Option<TriState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub childcare: Option<TriState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking: Option<TriState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_disposal: Option<TriState>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_info_query: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskFlagsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive_info_detected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_asking_to_submit_without_review: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_round_trips_unknown_and_known() {
        let unknown: Field<String> = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(unknown, Field::Unknown);
        let known: Field<String> = serde_json::from_str("\"서울특별시\"").unwrap();
        assert_eq!(known, Field::Known("서울특별시".to_string()));
        assert_eq!(
            serde_json::to_string(&Field::<String>::Unknown).unwrap(),
            "\"unknown\""
        );
    }

    #[test]
    fn merge_overwrites_scalars_and_merges_nested() {
        let profile = MoveProfile::default();
        let patch = ProfilePatch {
            to_region: Some(RegionPatch {
                sido: Some("서울특별시".into()),
                sgg: None,
            }),
            household_type: Some(HouseholdType::Single),
            ..Default::default()
        };
        let merged = profile.merge_patch(&patch);
        assert_eq!(merged.to_region.sido, Field::Known("서울특별시".into()));
        assert_eq!(merged.to_region.sgg, Field::Unknown);
        assert_eq!(merged.household_type, HouseholdType::Single);
        // Untouched siblings keep their sentinel.
        assert_eq!(merged.move_date, Field::Unknown);
    }
}
