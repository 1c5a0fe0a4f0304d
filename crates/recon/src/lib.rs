//! `crosscheck-recon`: three-source presence reconciliation engine.
//!
//! Pure engine crate: receives loaded tables, returns the sorted presence
//! matrix plus the layout needed to render it. No CLI or IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod report;
pub mod resolver;
pub mod summary;

pub use config::CrossCheckConfig;
pub use engine::{run, CrossCheckInput};
pub use error::{ConfigError, ReportError, SchemaError};
pub use model::{Cell, CrossCheckResult, RawTable, ReconciledRow, ReconciledTable, Source, SourceProjection};
pub use reconcile::reconcile;
pub use resolver::{resolve, resolve_with};
