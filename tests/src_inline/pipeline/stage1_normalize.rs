use super::*;
use crate::input::table::parse_table;
use crate::model::criteria::{Direction, SortKey};
use crate::model::level::{Level, classify};
use crate::pipeline::stage3_rank::rank;
use crate::testkit::{self, HEADER};

fn table(rows: &[&str]) -> RawTable {
    let mut text = format!("{HEADER}\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    parse_table(text.as_bytes(), b',').unwrap()
}

fn text(s: &str) -> RawCell {
    RawCell::Text(s.to_string())
}

#[test]
fn test_coerce_score_variants() {
    assert_eq!(coerce_score(&text(" 8.5 ")), Coerced::Value(8.5));
    assert_eq!(coerce_score(&text("1e1")), Coerced::Value(10.0));
    assert_eq!(coerce_score(&RawCell::Number(7.0)), Coerced::Value(7.0));
    assert_eq!(coerce_score(&text("n/a")), Coerced::Malformed);
    assert_eq!(coerce_score(&text("8,5")), Coerced::Malformed);
    assert_eq!(coerce_score(&text("NaN")), Coerced::Malformed);
    assert_eq!(coerce_score(&text("inf")), Coerced::Malformed);
    assert_eq!(coerce_score(&RawCell::Empty), Coerced::Malformed);
    assert_eq!(coerce_score(&RawCell::Bool(true)), Coerced::Malformed);
    assert_eq!(coerce_score(&RawCell::Number(f64::NAN)), Coerced::Malformed);
    assert_eq!(coerce_score(&text("11")), Coerced::Clamped(10.0));
    assert_eq!(coerce_score(&text("-2")), Coerced::Clamped(0.0));
    assert_eq!(Coerced::Malformed.value(), 0.0);
}

#[test]
fn test_malformed_cells_become_zero_and_rows_are_kept() {
    let t = table(&[
        "A,Legal,,,,,abc,,6,6,6,6",
        "B,Legal,,,,,6,6,6,6,6,6",
        ",,,,,,,,,,,",
    ]);
    let out = normalize(&t, &testkit::schema()).unwrap();
    assert_eq!(out.dataset.len(), t.len());
    let a = &out.dataset.records[0];
    assert_eq!(a.scores, vec![0.0, 0.0, 6.0, 6.0, 6.0, 6.0]);
    assert_eq!(a.composite, 4.0);
    let blank = &out.dataset.records[2];
    assert_eq!(blank.name, "");
    assert_eq!(blank.scores, vec![0.0; 6]);
    assert_eq!(blank.composite, 0.0);
    assert_eq!(out.stats.malformed_cells, vec![2, 2, 1, 1, 1, 1]);
    assert_eq!(out.stats.malformed_total(), 8);
}

#[test]
fn test_out_of_range_values_are_clamped() {
    let t = table(&["A,Legal,,,,,12,-1,5,5,5,5"]);
    let out = normalize(&t, &testkit::schema()).unwrap();
    assert_eq!(out.dataset.records[0].scores, vec![10.0, 0.0, 5.0, 5.0, 5.0, 5.0]);
    assert_eq!(out.stats.clamped_total(), 2);
    assert_eq!(out.stats.malformed_total(), 0);
}

#[test]
fn test_end_to_end_extremes() {
    let t = table(&[
        "B,X,,,,,0,0,0,0,0,0",
        "A,X,,,,,10,10,10,10,10,10",
    ]);
    let out = normalize(&t, &testkit::schema()).unwrap();
    let ds = &out.dataset;
    assert_eq!(ds.records[0].composite, 0.0);
    assert_eq!(ds.records[1].composite, 10.0);

    let ranked = rank(ds, SortKey::Composite, Direction::Descending, None);
    let names = ranked.iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(classify(ranked[0].composite), Level::Excellent);
    assert_eq!(classify(ranked[1].composite), Level::NeedsImprovement);
}

#[test]
fn test_attributes_and_extra_columns() {
    let header = "badge,name,department,affiliation,role,age,remarks,business,outreach,innovation,learning,overall,integrity,composite";
    let text = format!("{header}\nB-7,Li Na,Audit,Member,Clerk,33,steady,8,8,8,8,8,8,1.0\n");
    let t = parse_table(text.as_bytes(), b',').unwrap();
    let out = normalize(&t, &testkit::schema()).unwrap();
    let r = &out.dataset.records[0];
    assert_eq!(r.attributes.political_affiliation.as_deref(), Some("Member"));
    assert_eq!(r.attributes.role.as_deref(), Some("Clerk"));
    assert_eq!(r.attributes.age, Some(33.0));
    assert_eq!(r.attributes.remarks.as_deref(), Some("steady"));
    assert_eq!(
        r.attributes.extra,
        vec![("badge".to_string(), "B-7".to_string())]
    );
    assert_eq!(out.dataset.extra_columns, vec!["badge".to_string()]);
    // a composite column in the source is ignored and recomputed
    assert_eq!(r.composite, 8.0);
}

#[test]
fn test_optional_attribute_columns_may_be_absent() {
    let text = "name,department,business,outreach,innovation,learning,overall,integrity\nA,X,1,2,3,4,5,6\n";
    let t = parse_table(text.as_bytes(), b',').unwrap();
    let out = normalize(&t, &testkit::schema()).unwrap();
    let r = &out.dataset.records[0];
    assert_eq!(r.attributes, crate::model::record::Attributes::default());
    assert_eq!(r.composite, 3.5);
}

#[test]
fn test_missing_required_column_fails_whole_load() {
    let text = "name,business,outreach,innovation,learning,overall,integrity\nA,1,2,3,4,5,6\n";
    let t = parse_table(text.as_bytes(), b',').unwrap();
    let err = normalize(&t, &testkit::schema()).unwrap_err();
    assert!(matches!(err, InputError::MissingColumn(c) if c == "department"));
}

#[test]
fn test_heterogeneous_cells() {
    let t = RawTable::new(
        testkit::HEADER.split(',').map(|s| s.to_string()).collect(),
        vec![vec![
            text("A"),
            text("X"),
            RawCell::Empty,
            RawCell::Empty,
            RawCell::Number(40.0),
            RawCell::Empty,
            RawCell::Number(9.0),
            RawCell::Bool(true),
            text("9"),
            RawCell::Number(9.0),
            RawCell::Number(9.0),
            RawCell::Number(9.0),
        ]],
    );
    let out = normalize(&t, &testkit::schema()).unwrap();
    let r = &out.dataset.records[0];
    assert_eq!(r.scores, vec![9.0, 0.0, 9.0, 9.0, 9.0, 9.0]);
    assert_eq!(r.composite, 7.5);
    assert_eq!(r.attributes.age, Some(40.0));
}
