//! Equity module: owner outcome posture.

use crate::engine::{EngineConfig, Rule, Severity, Trigger};
use crate::snapshot::Snapshot;

use super::{facts, PROP_NOT_SELECTED};

pub(crate) const RULES: &[Rule] = &[
    PROP_NOT_SELECTED,
    Rule {
        id: "EQUITY_OUTCOME_MISSING",
        severity: Severity::Warning,
        title: "No equity outcome recorded",
        terminal: false,
        check: outcome_missing,
    },
    Rule {
        id: "EQUITY_RECOVERY_SHORTFALL",
        severity: Severity::Warning,
        title: "Value recovery shortfall",
        terminal: false,
        check: recovery_shortfall,
    },
    Rule {
        id: "EQUITY_LIENS_EXCEED_VALUE",
        severity: Severity::Critical,
        title: "Liens exceed property value",
        terminal: false,
        check: liens_exceed_value,
    },
];

fn outcome_missing(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    if snapshot.equity_outcome.is_some() {
        return None;
    }
    Some(
        Trigger::new(
            "Without a recorded outcome the program cannot show whether the owner's \
             equity position survived the storm, which is the measure this work is \
             judged by.",
        )
        .fact(facts::not_recorded("Equity outcome"))
        .action(
            "Record the equity outcome",
            "No equity outcome exists for this case.",
        ),
    )
}

fn recovery_shortfall(snapshot: &Snapshot, config: &EngineConfig) -> Option<Trigger> {
    let outcome = snapshot.equity_outcome.as_ref()?;
    let recovery = outcome.recovery_ratio()?;
    if recovery >= 1.0 - config.recovery_shortfall_ratio {
        return None;
    }
    Some(
        Trigger::new(
            "The property has recovered materially less value than it carried before \
             the storm; the remaining gap is an owner equity loss unless addressed.",
        )
        .fact(facts::labeled(
            "Pre-storm value",
            facts::money(outcome.pre_storm_value_cents),
        ))
        .fact(facts::labeled(
            "Post-remediation value",
            facts::money(outcome.post_remediation_value_cents),
        ))
        .fact(facts::labeled("Recovery", facts::percent(recovery)))
        .action(
            "Audit remediation scope against the valuation gap",
            format!(
                "Recovery stands at {} of pre-storm value.",
                facts::percent(recovery)
            ),
        ),
    )
}

fn liens_exceed_value(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    let outcome = snapshot.equity_outcome.as_ref()?;
    if outcome.outstanding_liens_cents <= outcome.post_remediation_value_cents {
        return None;
    }
    Some(
        Trigger::new(
            "Liens above the property's remediated value mean the owner holds negative \
             equity; any sale or refinance is underwater from day one.",
        )
        .fact(facts::labeled(
            "Outstanding liens",
            facts::money(outcome.outstanding_liens_cents),
        ))
        .fact(facts::labeled(
            "Post-remediation value",
            facts::money(outcome.post_remediation_value_cents),
        ))
        .action(
            "Engage lien holders on restructuring",
            "Recorded liens exceed the property's post-remediation value.",
        ),
    )
}
