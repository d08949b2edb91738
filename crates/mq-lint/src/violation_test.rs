use super::*;

#[test]
fn test_severity_ordering() {
    assert!(Severity::Info < Severity::Warning);
    assert!(Severity::Warning < Severity::Error);
    assert!(Severity::Error < Severity::Critical);
}

#[test]
fn test_rule_id_serializes_as_kebab_case() {
    let json = serde_json::to_string(&RuleId::NonNullWithoutDefault).unwrap();
    assert_eq!(json, "\"non-null-without-default\"");
    assert_eq!(RuleId::NonNullWithoutDefault.to_string(), "non-null-without-default");
}

#[test]
fn test_rule_id_risk_categories() {
    assert_eq!(RuleId::DropTable.risk_category(), "drop_table");
    assert_eq!(RuleId::DropColumn.risk_category(), "drop_column");
    assert_eq!(
        RuleId::NonNullWithoutDefault.risk_category(),
        "non_null_without_default"
    );
    assert_eq!(RuleId::TypeChange.risk_category(), "risky_type_change");
    assert_eq!(RuleId::MultipleHeads.risk_category(), "multiple_heads");
}

#[test]
fn test_violation_json_omits_missing_fields() {
    let violation = RuleViolation {
        rule_id: RuleId::MultipleHeads,
        severity: Severity::Critical,
        file_path: "<migration-graph>".to_string(),
        message: "Migration graph has 2 heads: a, b".to_string(),
        explanation: String::new(),
        suggested_fix: String::new(),
        example_snippet: None,
        line_hint: None,
    };
    let value = serde_json::to_value(&violation).unwrap();
    assert_eq!(value["severity"], "critical");
    assert_eq!(value["rule_id"], "multiple-heads");
    assert!(value.get("line_hint").is_none());
}
