//! Engine entry point: runs a module's rule set against a snapshot and
//! returns the ranked, explainable guidance report.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, instrument, trace, warn};

use crate::engine::{
    registry, EngineConfig, GuidanceError, GuidanceItem, GuidanceReport, Module, Rule,
    RuleDiagnostic, Severity,
};
use crate::snapshot::Snapshot;

/// A stateless transformation from `(module, snapshot)` to a ranked report.
/// Identical inputs always yield byte-identical output; the engine holds no
/// state across invocations beyond its configured thresholds.
#[derive(Debug, Clone, Default)]
pub struct GuidanceEngine {
    config: EngineConfig,
}

impl GuidanceEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run a module's registered rule set against a snapshot.
    #[instrument(
        name = "generate_guidance",
        skip(self, snapshot),
        fields(module = %module, case_id = %snapshot.case_id)
    )]
    pub fn generate(
        &self,
        module: Module,
        snapshot: &Snapshot,
    ) -> Result<GuidanceReport, GuidanceError> {
        snapshot.validate()?;
        let rules = registry::rule_set(module).ok_or_else(|| GuidanceError::UnknownModule {
            module: module.as_str().to_string(),
        })?;
        Ok(self.evaluate_rules(module, rules, snapshot))
    }

    /// Parse an untyped module identifier first. Unknown identifiers are a
    /// configuration error, never an empty report implying "no risks".
    pub fn generate_named(
        &self,
        module_id: &str,
        snapshot: &Snapshot,
    ) -> Result<GuidanceReport, GuidanceError> {
        let module = module_id.parse::<Module>()?;
        self.generate(module, snapshot)
    }

    /// Evaluate an explicit rule sequence. This is the seam the registry path
    /// goes through, and it accepts caller-supplied rule packs unchanged.
    ///
    /// A rule that panics while evaluating is treated as not fired: it is
    /// recorded as a diagnostic and its siblings still run. A fired terminal
    /// rule suppresses everything after it.
    pub fn evaluate_rules(
        &self,
        module: Module,
        rules: &[Rule],
        snapshot: &Snapshot,
    ) -> GuidanceReport {
        let mut items = Vec::new();
        let mut diagnostics = Vec::new();

        for rule in rules {
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(|| (rule.check)(snapshot, &self.config)));
            match outcome {
                Ok(Some(trigger)) => {
                    trace!(rule_id = rule.id, "rule fired");
                    let item = rule.build_item(trigger);
                    if rule.terminal {
                        let summary = summarize(std::slice::from_ref(&item));
                        return GuidanceReport {
                            module,
                            summary,
                            items: vec![item],
                            diagnostics,
                        };
                    }
                    items.push(item);
                }
                Ok(None) => trace!(rule_id = rule.id, "rule silent"),
                Err(payload) => {
                    let message = panic_message(payload);
                    warn!(rule_id = rule.id, %message, "rule failed while evaluating");
                    diagnostics.push(RuleDiagnostic {
                        rule_id: rule.id.to_string(),
                        message,
                    });
                }
            }
        }

        // Stable sort: declaration order breaks severity ties.
        items.sort_by_key(|item| item.severity.rank());
        let summary = summarize(&items);
        debug!(
            items = items.len(),
            diagnostics = diagnostics.len(),
            "guidance generated"
        );
        GuidanceReport {
            module,
            summary,
            items,
            diagnostics,
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "rule panicked with a non-string payload".to_string()
    }
}

fn summarize(items: &[GuidanceItem]) -> String {
    if items.is_empty() {
        return "No guidance items for this module.".to_string();
    }
    let by_severity = |severity: Severity| {
        items
            .iter()
            .filter(|item| item.severity == severity)
            .count()
    };
    format!(
        "{} guidance item(s): {} critical, {} warning, {} info.",
        items.len(),
        by_severity(Severity::Critical),
        by_severity(Severity::Warning),
        by_severity(Severity::Info)
    )
}
