//! Django migration adapter

use crate::error::{DiscoverError, DiscoverResult};
use crate::files;
use crate::python::{self, Call};
use crate::traits::MigrationAdapter;
use mq_core::{Framework, MigrationId, MigrationRecord};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// SQL equivalent of each Django migration operation
const OPERATION_SQL: &[(&str, &str)] = &[
    ("CreateModel", "CREATE TABLE"),
    ("DeleteModel", "DROP TABLE"),
    ("RenameModel", "ALTER TABLE RENAME"),
    ("AddField", "ALTER TABLE ADD COLUMN"),
    ("RemoveField", "ALTER TABLE DROP COLUMN"),
    ("AlterField", "ALTER TABLE ALTER COLUMN"),
    ("RenameField", "ALTER TABLE RENAME COLUMN"),
    ("AddIndex", "CREATE INDEX"),
    ("RemoveIndex", "DROP INDEX"),
    ("AlterUniqueTogether", "ALTER TABLE UNIQUE"),
    ("AlterIndexTogether", "ALTER TABLE INDEX"),
    ("RunSQL", "RAW SQL"),
    ("RunPython", "RUN PYTHON"),
];

fn migration_class() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*class\s+Migration\s*\(").expect("valid regex"))
}

fn dependencies_list() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*dependencies\s*=\s*\[").expect("valid regex"))
}

fn operations_list() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*operations\s*=\s*\[").expect("valid regex"))
}

/// Discovers migrations in every `migrations/` package of a Django project
#[derive(Debug, Clone)]
pub struct DjangoAdapter {
    root_dir: PathBuf,
}

impl DjangoAdapter {
    pub fn new(root_dir: impl AsRef<Path>) -> Self {
        let root_dir = root_dir.as_ref();
        Self {
            root_dir: root_dir
                .canonicalize()
                .unwrap_or_else(|_| root_dir.to_path_buf()),
        }
    }

    fn migration_packages(&self) -> Vec<PathBuf> {
        files::find_under(&self.root_dir, "**/migrations/__init__.py")
            .into_iter()
            .filter_map(|init| init.parent().map(Path::to_path_buf))
            .collect()
    }

    /// Parse one migration file. `Ok(None)` when it holds no migration class.
    pub(crate) fn parse_file(
        path: &Path,
        group: &str,
    ) -> DiscoverResult<Option<MigrationRecord>> {
        let source = files::read_source(path)?;
        let Some(class) = migration_class().find(&source) else {
            log::debug!("No Migration class in {}, skipping", path.display());
            return Ok(None);
        };
        let body = &source[class.end()..];

        let stem = files::file_stem(path);
        let id = MigrationId::try_new(format!("{group}.{stem}")).ok_or_else(|| {
            DiscoverError::Parse {
                path: path.display().to_string(),
                message: "empty migration name".to_string(),
            }
        })?;

        let dependencies = list_items(body, dependencies_list(), path)?
            .into_iter()
            .filter_map(dependency_id)
            .collect::<Vec<_>>();
        let operations = list_items(body, operations_list(), path)?
            .into_iter()
            .filter_map(operation_label)
            .collect::<Vec<_>>();

        Ok(Some(
            MigrationRecord::new(id, group)
                .with_dependencies(dependencies)
                .with_operations(operations)
                .with_content(source)
                .with_source_path(path),
        ))
    }
}

/// Items of the `name = [...]` list matched by `pattern`; empty if absent
fn list_items<'a>(body: &'a str, pattern: &Regex, path: &Path) -> DiscoverResult<Vec<&'a str>> {
    let Some(m) = pattern.find(body) else {
        return Ok(Vec::new());
    };
    let open = m.end() - 1;
    let inner = python::bracket_body(body, open).ok_or_else(|| DiscoverError::Parse {
        path: path.display().to_string(),
        message: format!("unterminated list '{}'", m.as_str().trim()),
    })?;
    Ok(python::split_top_level(inner))
}

/// `('app', 'name')` becomes `app.name`; anything else is ignored
fn dependency_id(item: &str) -> Option<String> {
    let item = item.trim();
    if !item.starts_with('(') {
        return None;
    }
    let parts = python::split_top_level(python::bracket_body(item, 0)?);
    let app = python::string_literal(parts.first()?)?;
    let name = python::string_literal(parts.get(1)?)?;
    if app.is_empty() || name.is_empty() {
        return None;
    }
    Some(format!("{app}.{name}"))
}

/// `migrations.AddField(model_name='User', ...)` becomes `ALTER TABLE ADD COLUMN: User`
fn operation_label(item: &str) -> Option<String> {
    let call = Call::parse(item)?;
    let op = call.name();
    let sql = OPERATION_SQL
        .iter()
        .find(|(name, _)| *name == op)
        .map_or(op, |(_, sql)| *sql);
    let detail = call
        .string_kwarg(&["model_name", "name"])
        .or_else(|| call.first_string_arg());

    Some(match detail {
        Some(detail) if !detail.is_empty() => format!("{sql}: {detail}"),
        _ => sql.to_string(),
    })
}

impl MigrationAdapter for DjangoAdapter {
    fn framework(&self) -> Framework {
        Framework::Django
    }

    fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn detect_framework(&self) -> bool {
        self.root_dir.join("manage.py").exists()
            || self.root_dir.join("settings.py").exists()
            || !self.migration_packages().is_empty()
    }

    fn discover_migrations(&self) -> Vec<MigrationRecord> {
        let mut records = Vec::new();

        for package in self.migration_packages() {
            let group = package
                .parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            let candidates = match files::python_files(&package) {
                Ok(files) => files,
                Err(e) => {
                    log::warn!("{}", e);
                    continue;
                }
            };

            for path in candidates {
                if path.file_name().is_some_and(|n| n == "__init__.py") {
                    continue;
                }
                match Self::parse_file(&path, &group) {
                    Ok(Some(record)) => records.push(record),
                    Ok(None) => {}
                    Err(e) => log::warn!("Skipping migration: {}", e),
                }
            }
        }

        log::debug!(
            "Discovered {} Django migration(s) under {}",
            records.len(),
            self.root_dir.display()
        );
        records
    }
}

#[cfg(test)]
#[path = "django_test.rs"]
mod tests;
