pub mod engine;
pub mod report;
pub mod rules;
pub mod snapshot;

pub use engine::{
    evaluator::GuidanceEngine, registry, EngineConfig, GapThresholds, GuidanceError, GuidanceItem,
    GuidanceReport, Module, RecommendedAction, Rule, RuleDiagnostic, Severity, Trigger,
};
pub use report::{render_report, OutputFormat};
pub use rules::facts;
pub use snapshot::{Snapshot, SnapshotError};
