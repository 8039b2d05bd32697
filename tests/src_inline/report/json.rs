use super::*;
use crate::pipeline::stage6_views::build_dashboard;
use crate::testkit;

#[test]
fn test_summary_reports_correlation_error() {
    let ds = testkit::dataset(vec![testkit::record("A", "Legal", [8.0; 6])]);
    let view = build_dashboard(&ds, &ds, ViewOptions::default());
    let criteria = FilterCriteria::default().with_name_contains("a");
    let doc = SummaryDocument::new(&view, ds.dimensions(), &criteria, None);
    let json: serde_json::Value = serde_json::from_str(&render_summary_json(&doc).unwrap()).unwrap();

    assert_eq!(json["tool"]["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["dimensions"].as_array().unwrap().len(), 6);
    assert_eq!(json["criteria"]["name_contains"], "a");
    assert_eq!(json["options"]["sort"], "composite");
    assert_eq!(json["options"]["direction"], "descending");
    assert!(json["normalization"].is_null());
    assert_eq!(json["kpis"]["mean_composite"], 8.0);
    assert_eq!(json["ranking"][0]["level"], "good");
    assert_eq!(json["group_means"]["Legal"]["count"], 1);
    assert!(json["correlation"]["matrix"].is_null());
    assert_eq!(
        json["correlation"]["error"],
        "insufficient data for correlation: need at least 2 records, got 1"
    );
}

#[test]
fn test_summary_serializes_undefined_correlation_as_null() {
    let ds = testkit::dataset(vec![
        testkit::record("A", "Legal", [8.0, 7.0, 6.0, 5.0, 4.0, 3.0]),
        testkit::record("B", "Legal", [8.0, 8.0, 7.0, 6.0, 5.0, 4.0]),
    ]);
    let view = build_dashboard(&ds, &ds, ViewOptions::default());
    let criteria = FilterCriteria::default();
    let doc = SummaryDocument::new(&view, ds.dimensions(), &criteria, None);
    let json: serde_json::Value = serde_json::from_str(&render_summary_json(&doc).unwrap()).unwrap();
    let values = &json["correlation"]["matrix"]["values"];
    assert_eq!(values[0][0], 1.0);
    assert!(values[0][1].is_null());
    assert!((values[1][2].as_f64().unwrap() - 1.0).abs() < 1e-9);
    assert!(json["correlation"]["error"].is_null());
}
