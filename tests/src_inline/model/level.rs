use super::*;

#[test]
fn test_boundaries_belong_to_higher_tier() {
    assert_eq!(classify(9.0), Level::Excellent);
    assert_eq!(classify(8.99), Level::Good);
    assert_eq!(classify(7.5), Level::Good);
    assert_eq!(classify(7.49), Level::Adequate);
    assert_eq!(classify(6.0), Level::Adequate);
    assert_eq!(classify(5.99), Level::NeedsImprovement);
}

#[test]
fn test_scale_ends() {
    assert_eq!(classify(10.0), Level::Excellent);
    assert_eq!(classify(0.0), Level::NeedsImprovement);
}

#[test]
fn test_out_of_range_degrades_to_end_tiers() {
    assert_eq!(classify(12.5), Level::Excellent);
    assert_eq!(classify(-3.0), Level::NeedsImprovement);
    assert_eq!(classify(f64::NAN), Level::NeedsImprovement);
}

#[test]
fn test_level_ordering_and_names() {
    assert!(Level::Excellent > Level::Good);
    assert!(Level::Adequate > Level::NeedsImprovement);
    assert_eq!(Level::NeedsImprovement.to_string(), "needs_improvement");
}
