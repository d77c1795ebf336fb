use super::*;

#[test]
fn test_header_normalization() {
    let index = HeaderIndex::new([" State_Name ", "YEAR", "ai_jobs_count", "all_jobs_state_year"]);
    assert_eq!(index.optional(columns::STATE_NAME), Some(0));
    assert_eq!(index.optional(columns::YEAR), Some(1));
    assert_eq!(index.optional(columns::STATE_ABBREV), None);
    assert!(index.validate(TableKind::Density).is_ok());
}

#[test]
fn test_missing_column() {
    let index = HeaderIndex::new(["state_name", "year", "ai_jobs_count"]);
    assert_eq!(
        index.validate(TableKind::Density),
        Err(SchemaValidationError::MissingColumn(
            columns::ALL_JOBS_STATE_YEAR.to_string()
        ))
    );
}

#[test]
fn test_skill_count_alias() {
    let with_count = HeaderIndex::new([
        "state_name",
        "lot_career_area_name",
        "skills_name",
        "count",
        "total_ai_listings",
    ]);
    assert!(with_count.validate(TableKind::Skills).is_ok());
    assert_eq!(with_count.require(&[columns::SKILL_COUNT, columns::COUNT]), Ok(3));

    let without = HeaderIndex::new(["state_name", "lot_career_area_name", "skills_name", "total_ai_listings"]);
    assert_eq!(
        without.validate(TableKind::Skills),
        Err(SchemaValidationError::MissingColumn(columns::SKILL_COUNT.to_string()))
    );
}

#[test]
fn test_duplicate_headers_first_wins() {
    let index = HeaderIndex::new(["state_name", "year", "state_name"]);
    assert_eq!(index.optional(columns::STATE_NAME), Some(0));
}

#[test]
fn test_table_kind_names() {
    let names: Vec<_> = TableKind::ALL.iter().map(|k| k.to_string()).collect();
    assert_eq!(names, ["density", "career", "intensity", "skills"]);
}

#[test]
fn test_table_kind_from_name() {
    for kind in TableKind::ALL {
        assert_eq!(TableKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(TableKind::from_name(" Skills "), Some(TableKind::Skills));
    assert_eq!(TableKind::from_name("career_share"), None);
}
