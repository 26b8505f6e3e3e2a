//! The process-wide rule registry.
//!
//! Populated once at startup and read-only thereafter; adding a module's
//! rules means adding one entry here, never modifying existing rule
//! implementations.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::engine::{Module, Rule, Severity};
use crate::rules;

static REGISTRY: Lazy<BTreeMap<Module, &'static [Rule]>> = Lazy::new(|| {
    BTreeMap::from([
        (Module::Intelligence, rules::intelligence::RULES),
        (Module::Forensic, rules::forensic::RULES),
        (Module::Insurance, rules::insurance::RULES),
        (Module::Execution, rules::execution::RULES),
        (Module::Equity, rules::equity::RULES),
    ])
});

/// The fixed rule sequence for a module, in declaration (tie-break) order.
pub fn rule_set(module: Module) -> Option<&'static [Rule]> {
    REGISTRY.get(&module).copied()
}

/// Serializable description of a registered rule; the check function stays
/// internal.
#[derive(Debug, Clone, Serialize)]
pub struct RuleInfo {
    pub module: Module,
    pub id: &'static str,
    pub severity: Severity,
    pub terminal: bool,
    pub title: &'static str,
}

/// Describe registered rules, optionally restricted to one module, in module
/// then declaration order.
pub fn describe(module: Option<Module>) -> Vec<RuleInfo> {
    REGISTRY
        .iter()
        .filter(|(registered, _)| module.map_or(true, |wanted| **registered == wanted))
        .flat_map(|(registered, rules)| {
            rules.iter().map(|rule| RuleInfo {
                module: *registered,
                id: rule.id,
                severity: rule.severity,
                terminal: rule.terminal,
                title: rule.title,
            })
        })
        .collect()
}
