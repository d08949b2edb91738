//! Alembic revision adapter

use crate::error::{DiscoverError, DiscoverResult};
use crate::files;
use crate::python::{self, Call};
use crate::traits::MigrationAdapter;
use mq_core::{Framework, MigrationId, MigrationRecord};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Group every Alembic revision is placed in
const GROUP: &str = "alembic";

/// Conventional versions directories, relative to the project root
const VERSIONS_DIRS: &[&str] = &["alembic/versions", "migrations/versions", "versions"];

/// SQL equivalent of each `op.` call
const OPERATION_SQL: &[(&str, &str)] = &[
    ("create_table", "CREATE TABLE"),
    ("drop_table", "DROP TABLE"),
    ("add_column", "ALTER TABLE ADD COLUMN"),
    ("drop_column", "ALTER TABLE DROP COLUMN"),
    ("alter_column", "ALTER TABLE ALTER COLUMN"),
    ("create_index", "CREATE INDEX"),
    ("drop_index", "DROP INDEX"),
    ("rename_table", "ALTER TABLE RENAME"),
    ("execute", "RAW SQL"),
];

/// `revision = 'abc'`, optionally annotated (`revision: str = "abc"`)
fn revision_assignment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^revision\s*(?::[^=\n]*)?=\s*['"]([^'"]+)['"]"#).expect("valid regex")
    })
}

fn down_revision_assignment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^down_revision\s*(?::[^=\n]*)?=[ \t]*").expect("valid regex"))
}

fn upgrade_def() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^def\s+upgrade\s*\(").expect("valid regex"))
}

/// Next top-level statement after a function body
fn top_level_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[^\s#]").expect("valid regex"))
}

fn op_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bop\.\w+\s*\(").expect("valid regex"))
}

/// Discovers Alembic revision files
#[derive(Debug, Clone)]
pub struct AlembicAdapter {
    root_dir: PathBuf,
}

impl AlembicAdapter {
    pub fn new(root_dir: impl AsRef<Path>) -> Self {
        let root_dir = root_dir.as_ref();
        Self {
            root_dir: root_dir
                .canonicalize()
                .unwrap_or_else(|_| root_dir.to_path_buf()),
        }
    }

    /// Versions directories holding revision files.
    ///
    /// The conventional locations win; otherwise any `versions/` directory
    /// next to an `env.py` is used.
    fn versions_dirs(&self) -> Vec<PathBuf> {
        let conventional: Vec<PathBuf> = VERSIONS_DIRS
            .iter()
            .map(|dir| self.root_dir.join(dir))
            .filter(|dir| dir.is_dir())
            .collect();
        if !conventional.is_empty() {
            return conventional;
        }

        files::find_under(&self.root_dir, "**/env.py")
            .into_iter()
            .filter_map(|env| env.parent().map(|p| p.join("versions")))
            .filter(|dir| dir.is_dir())
            .collect()
    }

    /// Parse one revision file. `Ok(None)` when it declares no revision id.
    pub(crate) fn parse_file(path: &Path) -> DiscoverResult<Option<MigrationRecord>> {
        let source = files::read_source(path)?;
        let Some(id) = revision_assignment()
            .captures(&source)
            .and_then(|caps| MigrationId::try_new(&caps[1]))
        else {
            log::debug!("No revision id in {}, skipping", path.display());
            return Ok(None);
        };

        let dependencies = down_revisions(&source).ok_or_else(|| DiscoverError::Parse {
            path: path.display().to_string(),
            message: "malformed down_revision".to_string(),
        })?;
        let operations = upgrade_operations(&source);

        Ok(Some(
            MigrationRecord::new(id, GROUP)
                .with_dependencies(dependencies)
                .with_operations(operations)
                .with_content(source)
                .with_source_path(path),
        ))
    }
}

/// Parent revisions from `down_revision`: `None`, a string, or a tuple/list of strings.
///
/// Returns `None` when the value is an unterminated tuple or list.
fn down_revisions(source: &str) -> Option<Vec<String>> {
    let Some(m) = down_revision_assignment().find(source) else {
        return Some(Vec::new());
    };
    let value = &source[m.end()..];

    if value.starts_with('(') || value.starts_with('[') {
        let inner = python::bracket_body(value, 0)?;
        return Some(
            python::split_top_level(inner)
                .into_iter()
                .filter_map(python::string_literal)
                .filter(|rev| !rev.is_empty())
                .collect(),
        );
    }

    let line = value.lines().next().unwrap_or_default();
    let expr = line.split('#').next().unwrap_or_default();
    Some(python::string_literal(expr).into_iter().collect())
}

/// Operation labels for the `op.` calls inside `def upgrade()`
fn upgrade_operations(source: &str) -> Vec<String> {
    let Some(def) = upgrade_def().find(source) else {
        return Vec::new();
    };
    let rest = &source[def.end()..];
    // the body ends at the next statement starting in column zero
    let body_start = rest.find('\n').map_or(rest.len(), |nl| nl + 1);
    let body_end = top_level_line()
        .find(&rest[body_start..])
        .map_or(rest.len(), |m| body_start + m.start());
    let body = &rest[..body_end];

    op_call()
        .find_iter(body)
        .filter_map(|m| Call::parse(&body[m.start()..]))
        .map(|call| {
            let op = call.name();
            let sql = OPERATION_SQL
                .iter()
                .find(|(name, _)| *name == op)
                .map_or(op, |(_, sql)| *sql);
            match call.first_string_arg() {
                Some(detail) if !detail.is_empty() => format!("{sql}: {detail}"),
                _ => sql.to_string(),
            }
        })
        .collect()
}

impl MigrationAdapter for AlembicAdapter {
    fn framework(&self) -> Framework {
        Framework::Alembic
    }

    fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn detect_framework(&self) -> bool {
        self.root_dir.join("alembic.ini").exists()
            || self.root_dir.join("alembic").exists()
            || self.root_dir.join("migrations").join("env.py").exists()
    }

    fn discover_migrations(&self) -> Vec<MigrationRecord> {
        let mut records = Vec::new();

        for dir in self.versions_dirs() {
            let candidates = match files::python_files(&dir) {
                Ok(files) => files,
                Err(e) => {
                    log::warn!("{}", e);
                    continue;
                }
            };

            for path in candidates {
                let hidden = path
                    .file_name()
                    .is_some_and(|n| n.to_string_lossy().starts_with("__"));
                if hidden {
                    continue;
                }
                match Self::parse_file(&path) {
                    Ok(Some(record)) => records.push(record),
                    Ok(None) => {}
                    Err(e) => log::warn!("Skipping revision: {}", e),
                }
            }
        }

        log::debug!(
            "Discovered {} Alembic revision(s) under {}",
            records.len(),
            self.root_dir.display()
        );
        records
    }
}

#[cfg(test)]
#[path = "alembic_test.rs"]
mod tests;
