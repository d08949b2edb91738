//! mq-discover: find migration files and normalize them into records
//!
//! Adapters read framework-specific Python sources without executing them.
//! Files that cannot be parsed are logged and skipped.

pub(crate) mod alembic;
pub(crate) mod django;
pub(crate) mod error;
pub(crate) mod files;
pub(crate) mod python;
pub(crate) mod resolve;
pub(crate) mod traits;

pub use alembic::AlembicAdapter;
pub use django::DjangoAdapter;
pub use error::{DiscoverError, DiscoverResult};
pub use resolve::resolve_adapter;
pub use traits::MigrationAdapter;
