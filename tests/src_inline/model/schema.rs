use super::*;

#[test]
fn test_procuratorial_preset_is_valid() {
    let schema = AbilitySchema::preset("procuratorial").unwrap();
    schema.validate().unwrap();
    assert_eq!(schema.dimensions.len(), DIMENSION_COUNT);
    assert_eq!(schema.spotlight_index(), Some(2));
}

#[test]
fn test_unknown_preset_rejected() {
    assert!(matches!(
        AbilitySchema::preset("legacy"),
        Err(PipelineError::Config(_))
    ));
}

#[test]
fn test_from_json_fills_defaults() {
    let json = r#"{
        "name_column": "name",
        "department_column": "dept",
        "dimensions": ["a", "b", "c", "d", "e", "f"]
    }"#;
    let schema = AbilitySchema::from_json(json).unwrap();
    assert_eq!(schema.spotlight_min, 9.0);
    assert_eq!(schema.composite_column, "综合得分");
    assert!(schema.role_column.is_none());
    assert_eq!(schema.dimension_index("d"), Some(3));
    assert_eq!(schema.spotlight_index(), None);
}

#[test]
fn test_validate_rejects_wrong_count_and_duplicates() {
    let mut schema = AbilitySchema::procuratorial();
    schema.dimensions.pop();
    assert!(matches!(schema.validate(), Err(PipelineError::Config(_))));

    let mut schema = AbilitySchema::procuratorial();
    schema.dimensions[5] = schema.dimensions[0].clone();
    assert!(matches!(schema.validate(), Err(PipelineError::Config(_))));
}

#[test]
fn test_validate_rejects_unknown_spotlight() {
    let mut schema = AbilitySchema::procuratorial();
    schema.spotlight_dimension = Some("nope".to_string());
    assert!(matches!(schema.validate(), Err(PipelineError::Config(_))));
}

#[test]
fn test_invalid_json_is_config_error() {
    assert!(matches!(
        AbilitySchema::from_json("{not json"),
        Err(PipelineError::Config(_))
    ));
}

#[test]
fn test_known_columns_cover_schema() {
    let schema = AbilitySchema::procuratorial();
    let known = schema.known_columns();
    assert!(known.contains(&"姓名"));
    assert!(known.contains(&"政治面貌"));
    assert!(known.contains(&"政治素养"));
    assert!(known.contains(&"综合得分"));
    assert_eq!(known.len(), 2 + 4 + DIMENSION_COUNT + 1);
}
