use super::*;
use crate::model::record::{Attributes, Record};
use crate::testkit;

fn sample() -> Dataset {
    let with_age = |name: &str, dept: &str, s: f64, age: f64| -> Record {
        testkit::record_with(
            name,
            dept,
            [s; 6],
            Attributes {
                age: Some(age),
                ..Attributes::default()
            },
        )
    };
    testkit::dataset(vec![
        with_age("Zhang Wei", "Legal", 9.2, 45.0),
        with_age("Li Na", "Audit", 7.0, 31.0),
        with_age("Wang Fang", "legal", 5.5, 38.0),
        with_age("Zhao Lei", "Outreach", 8.0, 27.0),
    ])
}

fn names(ds: &Dataset) -> Vec<&str> {
    ds.records.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_all_encompassing_criteria_return_full_dataset() {
    let ds = sample();
    let c = FilterCriteria::default()
        .with_departments(ds.departments().into_iter().map(str::to_string).collect::<Vec<_>>())
        .with_score_range(0.0, 10.0);
    let out = filter(&ds, &c);
    assert_eq!(out, ds);
}

#[test]
fn test_filter_is_idempotent() {
    let ds = sample();
    let c = FilterCriteria::default()
        .with_departments(["LEGAL", "Audit"])
        .with_score_range(6.0, 10.0);
    let once = filter(&ds, &c);
    let twice = filter(&once, &c);
    assert_eq!(once, twice);
    assert_eq!(names(&once), vec!["Zhang Wei", "Li Na"]);
}

#[test]
fn test_predicates_commute() {
    let ds = sample();
    let schema = testkit::schema();
    let by_dept = FilterCriteria::default().with_departments(["legal"]);
    let by_age = FilterCriteria::default().with_min_age(40.0);
    let by_dim = FilterCriteria::default()
        .with_dimension_min(&schema, "business", 5.0)
        .unwrap();
    let combined = FilterCriteria::default()
        .with_departments(["legal"])
        .with_min_age(40.0)
        .with_dimension_min(&schema, "business", 5.0)
        .unwrap();

    let a = filter(&filter(&filter(&ds, &by_dept), &by_age), &by_dim);
    let b = filter(&filter(&filter(&ds, &by_dim), &by_age), &by_dept);
    let c = filter(&ds, &combined);
    assert_eq!(a, b);
    assert_eq!(a, c);
    assert_eq!(names(&c), vec!["Zhang Wei"]);
}

#[test]
fn test_empty_result_is_valid() {
    let ds = sample();
    let c = FilterCriteria::default().with_name_contains("nobody");
    let out = filter(&ds, &c);
    assert!(out.is_empty());
    assert_eq!(out.dimensions(), ds.dimensions());
}

#[test]
fn test_order_is_preserved() {
    let ds = sample();
    let c = FilterCriteria::default().with_name_contains("a");
    let out = filter(&ds, &c);
    assert_eq!(
        names(&out),
        vec!["Zhang Wei", "Li Na", "Wang Fang", "Zhao Lei"]
    );
}
