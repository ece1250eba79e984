use chrono::NaiveDate;
use movedesk::extraction::ProfileExtractor;
use movedesk::profile::{Field, HouseholdType, MoveProfile, TriState};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
}

#[test]
fn single_message_yields_date_region_and_household() {
    let extractor = ProfileExtractor::korean();
    let profile = MoveProfile::default();
    let patch = extractor.extract(
        "어제 서울 강남구로 이사했어요. 아내랑 아이 둘이요",
        &profile,
        today(),
    );

    assert_eq!(patch.move_date, NaiveDate::from_ymd_opt(2026, 8, 23));
    let region = patch.to_region.expect("destination region expected");
    assert_eq!(region.sido.as_deref(), Some("서울특별시"));
    assert_eq!(region.sgg.as_deref(), Some("강남구"));
    assert_eq!(patch.household_type, Some(HouseholdType::Family));
    assert_eq!(patch.has_children, Some(TriState::Yes));
}

#[test]
fn source_marked_region_is_skipped() {
    let extractor = ProfileExtractor::korean();
    let profile = MoveProfile::default();

    let patch = extractor.extract("서울에서 부산으로 이사합니다", &profile, today());
    let region = patch.to_region.expect("destination region expected");
    assert_eq!(region.sido.as_deref(), Some("부산광역시"));

    let patch = extractor.extract("부산에서 서울로 이사합니다", &profile, today());
    let region = patch.to_region.expect("destination region expected");
    assert_eq!(region.sido.as_deref(), Some("서울특별시"));
}

#[test]
fn district_back_infers_its_province() {
    let extractor = ProfileExtractor::korean();
    let patch = extractor.extract("판교로 이사했어요", &MoveProfile::default(), today());
    let region = patch.to_region.expect("destination region expected");
    assert_eq!(region.sgg.as_deref(), Some("성남시"));
    assert_eq!(region.sido.as_deref(), Some("경기도"));
}

#[test]
fn absolute_and_month_day_dates_parse() {
    let extractor = ProfileExtractor::korean();
    let profile = MoveProfile::default();

    let patch = extractor.extract("2026년 3월 2일에 이사 예정이에요", &profile, today());
    assert_eq!(patch.move_date, NaiveDate::from_ymd_opt(2026, 3, 2));

    // Year omitted: resolved against the current year.
    let patch = extractor.extract("9월 1일에 들어갑니다", &profile, today());
    assert_eq!(patch.move_date, NaiveDate::from_ymd_opt(2026, 9, 1));
}

#[test]
fn one_turn_single_household_message_is_sufficient() {
    let extractor = ProfileExtractor::korean();
    let patch = extractor.extract(
        "어제 서울 강남구로 이사했어요. 혼자 살아요",
        &MoveProfile::default(),
        today(),
    );
    let merged = MoveProfile::default().merge_patch(&patch);
    assert!(merged.is_sufficient());
    assert_eq!(merged.household_type, HouseholdType::Single);
}

// Known limitation: the bare 에 postposition also follows locations that are
// not move destinations, so visit phrasing still reads as a destination.
#[test]
fn bare_e_postposition_still_reads_as_destination() {
    let extractor = ProfileExtractor::korean();
    let patch = extractor.extract("부산에 잠깐 들렀어요", &MoveProfile::default(), today());
    let region = patch.to_region.expect("destination region expected");
    assert_eq!(region.sido.as_deref(), Some("부산광역시"));
}

#[test]
fn known_fields_are_never_reproposed() {
    let extractor = ProfileExtractor::korean();
    let mut profile = MoveProfile::default();
    profile.move_date = Field::Known(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
    profile.to_region.sido = Field::Known("서울특별시".to_string());
    profile.to_region.sgg = Field::Known("강남구".to_string());
    profile.household_type = HouseholdType::Single;

    let patch = extractor.extract("어제 부산 해운대구로 혼자 왔습니다", &profile, today());
    assert!(patch.is_empty(), "known facts must not be re-extracted: {patch:?}");
}

#[test]
fn merge_is_monotonic_and_idempotent() {
    let extractor = ProfileExtractor::korean();
    let profile = MoveProfile::default();

    let patch = extractor.extract("어제 서울 강남구로 이사했어요", &profile, today());
    let merged = profile.merge_patch(&patch);
    assert!(merged.move_date.is_known());
    assert!(merged.to_region.sido.is_known());

    // Same patch applied again changes nothing.
    let again = merged.merge_patch(&patch);
    assert_eq!(again, merged);

    // Contradicting message against a filled profile yields nothing.
    let contradiction = extractor.extract("그저께 부산으로 이사했어요", &merged, today());
    assert_eq!(contradiction.move_date, None);
    assert!(contradiction.to_region.is_none());
}
