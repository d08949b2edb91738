use super::*;

#[test]
fn test_empty_id_rejected() {
    assert!(MigrationId::try_new("").is_none());
    assert_eq!(
        MigrationId::try_new("myapp.0001_initial").unwrap(),
        "myapp.0001_initial"
    );
}

#[test]
fn test_record_builder() {
    let record = MigrationRecord::new(MigrationId::try_new("myapp.0002").unwrap(), "myapp")
        .with_dependencies(["myapp.0001_initial"])
        .with_operations(["ALTER TABLE ADD COLUMN: email"])
        .with_content("migrations.AddField(...)")
        .with_source_path("myapp/migrations/0002.py");

    assert_eq!(record.group, "myapp");
    assert_eq!(record.dependencies, vec!["myapp.0001_initial".to_string()]);
    assert_eq!(record.operations.len(), 1);
    assert_eq!(record.display_path(), "myapp/migrations/0002.py");
}

#[test]
fn test_display_path_without_source() {
    let record = MigrationRecord::new(MigrationId::try_new("abc123").unwrap(), "alembic");
    assert_eq!(record.display_path(), "");
}

#[test]
fn test_deserialize_rejects_empty_id() {
    let yaml = "id: ''\ngroup: myapp\n";
    let result: Result<MigrationRecord, _> = serde_yaml::from_str(yaml);
    assert!(result.is_err());
}
