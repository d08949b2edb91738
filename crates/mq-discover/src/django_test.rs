use super::*;
use tempfile::TempDir;

const INITIAL: &str = r#"from django.db import migrations, models

class Migration(migrations.Migration):

    initial = True
    dependencies = []

    operations = [
        migrations.CreateModel(
            name='User',
            fields=[
                ('id', models.AutoField(primary_key=True)),
                ('username', models.CharField(max_length=150)),
            ],
        ),
    ]
"#;

const ADD_EMAIL: &str = r#"from django.db import migrations, models

class Migration(migrations.Migration):

    dependencies = [
        ('myapp', '0001_initial'),
    ]

    operations = [
        migrations.AddField(
            model_name='User',
            name='email',
            field=models.EmailField(null=False),
        ),
    ]
"#;

fn django_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let migrations = dir.path().join("myapp").join("migrations");
    std::fs::create_dir_all(&migrations).unwrap();
    std::fs::write(migrations.join("__init__.py"), "").unwrap();
    std::fs::write(migrations.join("0001_initial.py"), INITIAL).unwrap();
    std::fs::write(migrations.join("0002_add_email.py"), ADD_EMAIL).unwrap();
    std::fs::write(dir.path().join("manage.py"), "# manage.py stub").unwrap();
    dir
}

#[test]
fn test_detect_framework() {
    let dir = django_project();
    assert!(DjangoAdapter::new(dir.path()).detect_framework());
    assert_eq!(DjangoAdapter::new(dir.path()).framework(), Framework::Django);
}

#[test]
fn test_detect_by_migrations_package_only() {
    let dir = TempDir::new().unwrap();
    let migrations = dir.path().join("shop").join("migrations");
    std::fs::create_dir_all(&migrations).unwrap();
    std::fs::write(migrations.join("__init__.py"), "").unwrap();
    assert!(DjangoAdapter::new(dir.path()).detect_framework());
}

#[test]
fn test_not_detected_in_empty_dir() {
    let dir = TempDir::new().unwrap();
    assert!(!DjangoAdapter::new(dir.path()).detect_framework());
}

#[test]
fn test_discover_migrations() {
    let dir = django_project();
    let records = DjangoAdapter::new(dir.path()).discover_migrations();
    assert_eq!(records.len(), 2);

    let initial = &records[0];
    assert_eq!(initial.id, "myapp.0001_initial");
    assert_eq!(initial.group, "myapp");
    assert!(initial.dependencies.is_empty());
    assert_eq!(initial.operations, vec!["CREATE TABLE: User".to_string()]);
    assert_eq!(initial.raw_content, INITIAL);
    assert!(initial.source_path.is_some());

    let add_email = &records[1];
    assert_eq!(add_email.id, "myapp.0002_add_email");
    assert_eq!(add_email.dependencies, vec!["myapp.0001_initial".to_string()]);
    assert_eq!(
        add_email.operations,
        vec!["ALTER TABLE ADD COLUMN: User".to_string()]
    );
}

#[test]
fn test_file_without_migration_class_is_skipped() {
    let dir = django_project();
    let migrations = dir.path().join("myapp").join("migrations");
    std::fs::write(migrations.join("helpers.py"), "def util():\n    return 1\n").unwrap();

    let records = DjangoAdapter::new(dir.path()).discover_migrations();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_malformed_file_is_skipped() {
    let dir = django_project();
    let migrations = dir.path().join("myapp").join("migrations");
    std::fs::write(
        migrations.join("0003_broken.py"),
        "class Migration(migrations.Migration):\n    dependencies = [\n        ('myapp', '0002'\n",
    )
    .unwrap();

    let records = DjangoAdapter::new(dir.path()).discover_migrations();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.id != "myapp.0003_broken"));
}

#[test]
fn test_parse_operations_and_dependencies() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("0003_cleanup.py");
    let source = r#"from django.conf import settings
from django.db import migrations

class Migration(migrations.Migration):

    dependencies = [
        migrations.swappable_dependency(settings.AUTH_USER_MODEL),
        ('billing', '0007_invoice'),
        ("myapp", "0002_add_email"),  # trailing comment
    ]

    operations = [
        migrations.DeleteModel(name='Legacy'),
        migrations.RemoveField(model_name='Profile', name='bio'),
        migrations.RunSQL("UPDATE users SET active = true"),
        migrations.RunPython(forwards),
        migrations.SeparateDatabaseAndState(state_operations=[]),
    ]
"#;
    std::fs::write(&path, source).unwrap();

    let record = DjangoAdapter::parse_file(&path, "myapp").unwrap().unwrap();
    assert_eq!(record.id, "myapp.0003_cleanup");
    assert_eq!(
        record.dependencies,
        vec!["billing.0007_invoice".to_string(), "myapp.0002_add_email".to_string()]
    );
    assert_eq!(
        record.operations,
        vec![
            "DROP TABLE: Legacy".to_string(),
            "ALTER TABLE DROP COLUMN: Profile".to_string(),
            "RAW SQL: UPDATE users SET active = true".to_string(),
            "RUN PYTHON".to_string(),
            "SeparateDatabaseAndState".to_string(),
        ]
    );
}

#[test]
fn test_multiple_apps_grouped_by_package() {
    let dir = django_project();
    let billing = dir.path().join("billing").join("migrations");
    std::fs::create_dir_all(&billing).unwrap();
    std::fs::write(billing.join("__init__.py"), "").unwrap();
    std::fs::write(billing.join("0001_initial.py"), INITIAL).unwrap();

    let records = DjangoAdapter::new(dir.path()).discover_migrations();
    let ids: Vec<_> = records.iter().map(|r| r.id.to_string()).collect();
    assert_eq!(
        ids,
        vec![
            "billing.0001_initial",
            "myapp.0001_initial",
            "myapp.0002_add_email",
        ]
    );
}
