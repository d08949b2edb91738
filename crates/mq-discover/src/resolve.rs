//! Framework selection

use crate::alembic::AlembicAdapter;
use crate::django::DjangoAdapter;
use crate::traits::MigrationAdapter;
use mq_core::Framework;
use std::path::Path;

/// Pick the adapter for `framework` rooted at `root_dir`.
///
/// `Auto` tries Django, then Alembic, and falls back to Django when neither
/// is detected.
pub fn resolve_adapter(framework: Framework, root_dir: &Path) -> Box<dyn MigrationAdapter> {
    match framework {
        Framework::Django => Box::new(DjangoAdapter::new(root_dir)),
        Framework::Alembic => Box::new(AlembicAdapter::new(root_dir)),
        Framework::Auto => {
            let django = DjangoAdapter::new(root_dir);
            if django.detect_framework() {
                log::debug!("Detected Django project at {}", root_dir.display());
                return Box::new(django);
            }
            let alembic = AlembicAdapter::new(root_dir);
            if alembic.detect_framework() {
                log::debug!("Detected Alembic project at {}", root_dir.display());
                return Box::new(alembic);
            }
            log::debug!(
                "No framework detected at {}, defaulting to Django",
                root_dir.display()
            );
            Box::new(django)
        }
    }
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
