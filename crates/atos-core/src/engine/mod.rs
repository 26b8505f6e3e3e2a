use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod evaluator;
pub mod registry;

use crate::snapshot::{Snapshot, SnapshotError};

/// Severity buckets for guidance items, most severe first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Ordering rank used by the ranking stage: `critical` (0) < `warning`
    /// (1) < `info` (2).
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::Warning => 1,
            Self::Info => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guidance module identifiers. Each maps to exactly one rule set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Intelligence,
    Forensic,
    Insurance,
    Execution,
    Equity,
}

impl Module {
    pub const ALL: [Module; 5] = [
        Module::Intelligence,
        Module::Forensic,
        Module::Insurance,
        Module::Execution,
        Module::Equity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intelligence => "intelligence",
            Self::Forensic => "forensic",
            Self::Insurance => "insurance",
            Self::Execution => "execution",
            Self::Equity => "equity",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = GuidanceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "intelligence" => Ok(Self::Intelligence),
            "forensic" => Ok(Self::Forensic),
            "insurance" => Ok(Self::Insurance),
            "execution" => Ok(Self::Execution),
            "equity" => Ok(Self::Equity),
            _ => Err(GuidanceError::UnknownModule {
                module: value.to_string(),
            }),
        }
    }
}

/// One imperative next step attached to a guidance item, with the rationale
/// tying it back to the grounded facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedAction {
    pub label: String,
    pub rationale: String,
}

/// One ranked, explainable finding. `id` equals the rule id and is stable
/// across invocations; the content varies with the snapshot, the identity
/// does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceItem {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub why_it_matters: String,
    /// Literal values pulled from the snapshot, never paraphrased
    /// interpretation.
    pub grounded_facts: Vec<String>,
    pub recommended_actions: Vec<RecommendedAction>,
}

/// Raw trigger data a fired rule hands to the item builder.
#[derive(Debug, Clone)]
pub struct Trigger {
    /// Escalated presentation severity. `None` keeps the rule's declared
    /// severity.
    pub severity: Option<Severity>,
    pub why_it_matters: String,
    pub grounded_facts: Vec<String>,
    pub recommended_actions: Vec<RecommendedAction>,
}

impl Trigger {
    pub fn new(why_it_matters: impl Into<String>) -> Self {
        Self {
            severity: None,
            why_it_matters: why_it_matters.into(),
            grounded_facts: Vec::new(),
            recommended_actions: Vec::new(),
        }
    }

    pub fn escalate(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn fact(mut self, fact: impl Into<String>) -> Self {
        self.grounded_facts.push(fact.into());
        self
    }

    pub fn action(mut self, label: impl Into<String>, rationale: impl Into<String>) -> Self {
        self.recommended_actions.push(RecommendedAction {
            label: label.into(),
            rationale: rationale.into(),
        });
        self
    }
}

/// Definition of a single guidance rule: a pure predicate over the snapshot
/// plus the fixed identity of the item it produces.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Stable, namespaced identifier (e.g. `EVID_NONE`), independent of
    /// snapshot content.
    pub id: &'static str,
    /// Declared severity; a trigger may escalate presentation.
    pub severity: Severity,
    pub title: &'static str,
    /// A terminal rule fires instead of all other rules in its module.
    pub terminal: bool,
    pub check: fn(&Snapshot, &EngineConfig) -> Option<Trigger>,
}

impl Rule {
    /// Combine a fired rule's trigger data with its fixed identity.
    pub fn build_item(&self, trigger: Trigger) -> GuidanceItem {
        GuidanceItem {
            id: self.id.to_string(),
            severity: trigger.severity.unwrap_or(self.severity),
            title: self.title.to_string(),
            why_it_matters: trigger.why_it_matters,
            grounded_facts: trigger.grounded_facts,
            recommended_actions: trigger.recommended_actions,
        }
    }
}

/// Diagnostic for a rule that failed while evaluating. The rule is treated
/// as not fired; it never becomes a fabricated item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDiagnostic {
    pub rule_id: String,
    pub message: String,
}

/// End-to-end result of one engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceReport {
    pub module: Module,
    /// One templated sentence derived only from the severity counts of
    /// `items`.
    pub summary: String,
    pub items: Vec<GuidanceItem>,
    pub diagnostics: Vec<RuleDiagnostic>,
}

impl GuidanceReport {
    /// True when at least one rule failed while evaluating, so the item list
    /// may be incomplete.
    pub fn is_partial(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Materiality thresholds for the insured-vs-carrier estimate gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapThresholds {
    pub warning_ratio: f64,
    pub critical_ratio: f64,
}

impl Default for GapThresholds {
    fn default() -> Self {
        Self {
            warning_ratio: 0.10,
            critical_ratio: 0.25,
        }
    }
}

/// Tunable thresholds for the rule sets. Defaults match production; the CLI
/// can layer a config file and `ATOS_*` environment overrides on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scope_gap: GapThresholds,
    pub completion_floor_percent: u8,
    pub recovery_shortfall_ratio: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scope_gap: GapThresholds::default(),
            completion_floor_percent: 50,
            recovery_shortfall_ratio: 0.15,
        }
    }
}

/// Errors that abort a guidance invocation. Neither may be silently
/// defaulted to an empty guidance list.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GuidanceError {
    #[error("unknown guidance module `{module}`")]
    UnknownModule { module: String },
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(#[from] SnapshotError),
}
