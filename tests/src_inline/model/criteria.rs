use super::*;
use crate::model::record::Attributes;
use crate::testkit;

fn aged(age: Option<f64>) -> Record {
    testkit::record_with(
        "Zhang Wei",
        "Legal",
        [8.0; 6],
        Attributes {
            age,
            ..Attributes::default()
        },
    )
}

#[test]
fn test_default_criteria_match_everything() {
    let c = FilterCriteria::default();
    assert!(c.matches(&testkit::record("A", "X", [0.0; 6])));
    assert!(c.matches(&aged(None)));
}

#[test]
fn test_department_match_is_case_insensitive() {
    let c = FilterCriteria::default().with_departments(["legal "]);
    assert!(c.matches(&testkit::record("A", "Legal", [5.0; 6])));
    assert!(!c.matches(&testkit::record("A", "Audit", [5.0; 6])));
}

#[test]
fn test_empty_department_selection_matches_nothing() {
    let c = FilterCriteria::default().with_departments(Vec::<String>::new());
    assert!(!c.matches(&testkit::record("A", "Legal", [5.0; 6])));
}

#[test]
fn test_score_range_is_inclusive() {
    let c = FilterCriteria::default().with_score_range(6.0, 8.0);
    assert!(c.matches(&testkit::record("A", "X", [6.0; 6])));
    assert!(c.matches(&testkit::record("A", "X", [8.0; 6])));
    assert!(!c.matches(&testkit::record("A", "X", [8.5; 6])));
    assert!(!c.matches(&testkit::record("A", "X", [5.5; 6])));
}

#[test]
fn test_dimension_minimum() {
    let schema = testkit::schema();
    let c = FilterCriteria::default()
        .with_dimension_min(&schema, "innovation", 9.0)
        .unwrap();
    assert_eq!(c.dimension_min, vec![(2, 9.0)]);
    assert!(c.matches(&testkit::record("A", "X", [0.0, 0.0, 9.0, 0.0, 0.0, 0.0])));
    assert!(!c.matches(&testkit::record("A", "X", [10.0, 10.0, 8.9, 10.0, 10.0, 10.0])));
}

#[test]
fn test_unknown_dimension_is_rejected() {
    let schema = testkit::schema();
    let err = FilterCriteria::default()
        .with_dimension_min(&schema, "charisma", 5.0)
        .unwrap_err();
    assert!(matches!(err, PipelineError::UnknownField(f) if f == "charisma"));
}

#[test]
fn test_name_substring_is_unanchored_and_case_insensitive() {
    let c = FilterCriteria::default().with_name_contains("WEI");
    assert!(c.matches(&aged(None)));
    let c = FilterCriteria::default().with_name_contains("ang w");
    assert!(c.matches(&aged(None)));
    let c = FilterCriteria::default().with_name_contains("Li");
    assert!(!c.matches(&aged(None)));
}

#[test]
fn test_min_age_requires_known_age() {
    let c = FilterCriteria::default().with_min_age(30.0);
    assert!(c.matches(&aged(Some(30.0))));
    assert!(!c.matches(&aged(Some(29.0))));
    assert!(!c.matches(&aged(None)));
}

#[test]
fn test_sort_key_parse() {
    let schema = testkit::schema();
    assert_eq!(SortKey::parse("composite", &schema).unwrap(), SortKey::Composite);
    assert_eq!(
        SortKey::parse("learning", &schema).unwrap(),
        SortKey::Dimension(3)
    );
    assert!(matches!(
        SortKey::parse("height", &schema),
        Err(PipelineError::UnknownField(_))
    ));
    assert_eq!(SortKey::Dimension(3).label(&schema), "learning");
    assert_eq!(SortKey::Composite.label(&schema), "composite");
}

#[test]
fn test_group_key_values() {
    let r = testkit::record_with(
        "A",
        "Legal",
        [5.0; 6],
        Attributes {
            political_affiliation: Some("Member".to_string()),
            ..Attributes::default()
        },
    );
    assert_eq!(GroupKey::Department.value(&r), Some("Legal"));
    assert_eq!(GroupKey::PoliticalAffiliation.value(&r), Some("Member"));
    assert_eq!(GroupKey::Role.value(&r), None);
}
