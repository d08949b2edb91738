//! CLI command implementations

pub(crate) mod check;
pub(crate) mod common;
pub(crate) mod compare;
pub(crate) mod lint;
pub(crate) mod protect;
pub(crate) mod ready;
