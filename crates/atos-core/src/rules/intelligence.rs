//! Intelligence module: cross-area case posture.

use crate::engine::{EngineConfig, Rule, Severity, Trigger};
use crate::snapshot::{ClaimMilestone, Snapshot, VerificationStatus};

use super::{facts, PROP_NOT_SELECTED};

pub(crate) const RULES: &[Rule] = &[
    PROP_NOT_SELECTED,
    Rule {
        id: "INTEL_NO_INSPECTIONS",
        severity: Severity::Warning,
        title: "No inspections on file",
        terminal: false,
        check: no_inspections,
    },
    Rule {
        id: "INTEL_CLAIM_UNFILED",
        severity: Severity::Warning,
        title: "Verified evidence without a claim",
        terminal: false,
        check: claim_unfiled,
    },
    Rule {
        id: "INTEL_CARRIER_SILENCE",
        severity: Severity::Warning,
        title: "No carrier contact on record",
        terminal: false,
        check: carrier_silence,
    },
    Rule {
        id: "INTEL_EQUITY_UNTRACKED",
        severity: Severity::Info,
        title: "Equity outcome not recorded",
        terminal: false,
        check: equity_untracked,
    },
];

fn no_inspections(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    if !snapshot.inspections.is_empty() {
        return None;
    }
    Some(
        Trigger::new(
            "Until an inspection is on the calendar, damage scope is unquantified and \
             every downstream estimate is provisional.",
        )
        .fact(facts::count("Inspections on file", 0))
        .action(
            "Schedule an initial inspection",
            "The case has no inspections recorded.",
        ),
    )
}

fn claim_unfiled(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    if !snapshot.claims.is_empty() {
        return None;
    }
    let verified = snapshot.evidence_count_by_status(VerificationStatus::Verified);
    if verified == 0 {
        return None;
    }
    Some(
        Trigger::new(
            "Verified evidence is already strong enough to open a claim; waiting burns \
             policy deadlines without improving position.",
        )
        .fact(facts::count("Claims filed", 0))
        .fact(facts::count("Verified evidence items", verified))
        .action(
            "File the insurance claim",
            format!("{verified} verified evidence item(s) are ready to support a filing."),
        ),
    )
}

fn carrier_silence(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    if snapshot.claims.is_empty() || !snapshot.carrier_interactions.is_empty() {
        return None;
    }
    Some(
        Trigger::new(
            "A filed claim with no carrier contact on record is invisible; undocumented \
             calls cannot be escalated later.",
        )
        .fact(facts::count("Claims filed", snapshot.claims.len()))
        .fact(facts::count("Carrier interactions", 0))
        .action(
            "Log carrier contact",
            "Claims exist but no carrier interaction has been recorded.",
        ),
    )
}

fn equity_untracked(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    if snapshot.equity_outcome.is_some() {
        return None;
    }
    let paid = snapshot
        .claims
        .iter()
        .filter(|claim| claim.milestone == ClaimMilestone::Paid)
        .count();
    if paid == 0 {
        return None;
    }
    Some(
        Trigger::new(
            "A paid claim without a recorded equity outcome leaves the final owner \
             position unmeasured, which is the reporting this program exists for.",
        )
        .fact(facts::count("Paid claims", paid))
        .fact(facts::not_recorded("Equity outcome"))
        .action(
            "Record the equity outcome",
            format!("{paid} claim(s) have paid out with no outcome on file."),
        ),
    )
}
