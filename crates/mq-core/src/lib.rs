//! mq-core - Core library for MigrationIQ
//!
//! This crate provides the normalized migration record, the migration
//! dependency graph with its structural analyses, the risk scorer and the
//! settings model shared by every other MigrationIQ component.

pub mod config;
pub mod error;
pub mod graph;
pub mod migration;
pub mod risk;

pub use config::{DatabaseEngine, Framework, RulesConfig, Settings};
pub use error::{CoreError, CoreResult};
pub use graph::{GraphIssue, IssueKind, IssueSeverity, MigrationGraph};
pub use migration::{MigrationId, MigrationRecord};
pub use risk::{RiskFinding, RiskReport, RiskScorer, RiskSeverity, RiskWeights};
