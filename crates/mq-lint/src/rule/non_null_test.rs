use super::*;
use crate::test_utils::*;

fn count(content: &str) -> usize {
    NonNullRule.evaluate(&record("m", content)).len()
}

#[test]
fn test_no_violation_on_create() {
    assert_eq!(count(DJANGO_INITIAL), 0);
}

#[test]
fn test_raw_sql_not_null_without_default() {
    let violations = NonNullRule.evaluate(&record(
        "raw",
        "ALTER TABLE users ADD COLUMN age INTEGER NOT NULL;",
    ));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule_id, RuleId::NonNullWithoutDefault);
    assert_eq!(violations[0].severity, Severity::Error);
}

#[test]
fn test_raw_sql_with_default_passes() {
    assert_eq!(
        count("ALTER TABLE users ADD COLUMN age INTEGER NOT NULL DEFAULT 0;"),
        0
    );
    assert_eq!(
        count("ALTER TABLE users ADD COLUMN age INTEGER DEFAULT 0 NOT NULL;"),
        0
    );
}

#[test]
fn test_raw_sql_nullable_column_passes() {
    assert_eq!(count("ALTER TABLE users ADD COLUMN nickname TEXT;"), 0);
}

#[test]
fn test_raw_sql_checks_each_statement() {
    let content = "ALTER TABLE a ADD COLUMN x INT NOT NULL DEFAULT 0;\n\
                   ALTER TABLE b ADD COLUMN y INT NOT NULL;";
    let violations = NonNullRule.evaluate(&record("raw", content));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line_hint, Some(2));
}

#[test]
fn test_raw_sql_checks_each_clause() {
    assert_eq!(
        count("ALTER TABLE users ADD COLUMN a INT DEFAULT 0, ADD COLUMN b INT NOT NULL;"),
        1
    );
    assert_eq!(
        count("ALTER TABLE users ADD COLUMN a INT NOT NULL, ADD COLUMN b INT DEFAULT 0;"),
        1
    );
    assert_eq!(
        count("ALTER TABLE users ADD COLUMN a INT NOT NULL DEFAULT 0, ADD COLUMN b TEXT;"),
        0
    );
}

#[test]
fn test_raw_sql_parenthesised_type_is_one_clause() {
    assert_eq!(
        count("ALTER TABLE orders ADD COLUMN total NUMERIC(10, 2) NOT NULL DEFAULT 0;"),
        0
    );
    assert_eq!(
        count("ALTER TABLE orders ADD COLUMN total NUMERIC(10, 2) NOT NULL;"),
        1
    );
}

#[test]
fn test_raw_sql_lowercase() {
    assert_eq!(count("alter table users add column age integer not null;"), 1);
}

#[test]
fn test_django_add_field_null_false() {
    assert_eq!(count(DJANGO_ADD_EMAIL), 1);

    let inline = "migrations.AddField(model_name='User', name='age', \
                  field=models.IntegerField(null=False)),";
    assert_eq!(count(inline), 1);
}

#[test]
fn test_django_add_field_with_default_passes() {
    let content = "migrations.AddField(model_name='User', name='age', \
                   field=models.IntegerField(null=False, default=0)),";
    assert_eq!(count(content), 0);
}

#[test]
fn test_django_nullable_add_field_passes() {
    let content = "migrations.AddField(model_name='User', name='bio', \
                   field=models.TextField(null=True)),";
    assert_eq!(count(content), 0);
}

#[test]
fn test_alembic_nullable_false() {
    let violations = NonNullRule.evaluate(&record("def456", ALEMBIC_ADD_EMAIL));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line_hint, Some(9));
    assert!(violations[0].message.contains("op.add_column"));
}

#[test]
fn test_alembic_server_default_passes() {
    let content = "op.add_column('users', sa.Column('age', sa.Integer(), \
                   nullable=False, server_default='0'))";
    assert_eq!(count(content), 0);
}

#[test]
fn test_keyword_outside_window_is_ignored() {
    let content = format!(
        "migrations.AddField(model_name='User', name='age'),\n{}\nnull=False",
        " ".repeat(400)
    );
    assert_eq!(count(&content), 0);
}
