//! Insurance module: claims and carrier posture.

use std::cmp::Ordering;

use crate::engine::{EngineConfig, Rule, Severity, Trigger};
use crate::snapshot::Snapshot;

use super::{facts, PROP_NOT_SELECTED};

pub(crate) const RULES: &[Rule] = &[
    PROP_NOT_SELECTED,
    Rule {
        id: "INS_NO_CLAIMS",
        severity: Severity::Warning,
        title: "No claims filed",
        terminal: false,
        check: no_claims,
    },
    Rule {
        id: "INS_MILESTONE_BLOCKED",
        severity: Severity::Critical,
        title: "Claim milestone blocked",
        terminal: false,
        check: milestone_blocked,
    },
    Rule {
        id: "INS_FOLLOWUP_OVERDUE",
        severity: Severity::Warning,
        title: "Carrier follow-up overdue",
        terminal: false,
        check: followup_overdue,
    },
    Rule {
        id: "INS_SCOPE_GAP",
        severity: Severity::Warning,
        title: "Material estimate discrepancy",
        terminal: false,
        check: scope_gap,
    },
];

fn no_claims(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    if !snapshot.claims.is_empty() {
        return None;
    }
    Some(
        Trigger::new(
            "No claim means no carrier obligation; policy filing windows keep running \
             regardless.",
        )
        .fact(facts::count("Claims filed", 0))
        .action(
            "File a claim with the carrier",
            "The case has no claims on record.",
        ),
    )
}

fn milestone_blocked(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    let blocked: Vec<_> = snapshot.claims.iter().filter(|claim| claim.blocked).collect();
    if blocked.is_empty() {
        return None;
    }
    let mut trigger = Trigger::new(
        "A blocked milestone halts the payout pipeline; every week stalled compounds \
         the owner's carrying costs.",
    )
    .fact(facts::count("Blocked claims", blocked.len()));
    for claim in &blocked {
        trigger = trigger.fact(facts::labeled(
            &format!("Claim {} milestone", claim.claim_number),
            claim.milestone.as_str(),
        ));
    }
    Some(trigger.action(
        "Resolve the blocking condition with the carrier",
        format!(
            "{} claim(s) are stalled at their current milestone.",
            blocked.len()
        ),
    ))
}

fn followup_overdue(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    let as_of = snapshot.as_of.date_naive();
    let overdue: Vec<_> = snapshot
        .carrier_interactions
        .iter()
        .filter(|interaction| interaction.follow_up_overdue(as_of))
        .collect();
    if overdue.is_empty() {
        return None;
    }
    let mut trigger = Trigger::new(
        "Carriers deprioritize claims nobody chases; a missed follow-up date usually \
         means a silent denial clock is running.",
    )
    .fact(facts::count("Overdue follow-ups", overdue.len()));
    if let Some(oldest) = overdue
        .iter()
        .filter_map(|interaction| interaction.follow_up_due)
        .min()
    {
        trigger = trigger.fact(facts::labeled("Oldest due date", facts::date(oldest)));
    }
    Some(trigger.action(
        "Contact the carrier today",
        format!("{} follow-up(s) are past due.", overdue.len()),
    ))
}

fn scope_gap(snapshot: &Snapshot, config: &EngineConfig) -> Option<Trigger> {
    let thresholds = &config.scope_gap;
    let gaps: Vec<(f64, &str, i64, i64)> = snapshot
        .claims
        .iter()
        .filter_map(|claim| {
            let insured = claim.insured_estimate_cents?;
            let carrier = claim.carrier_estimate_cents?;
            let ratio = claim.scope_gap_ratio()?;
            (ratio >= thresholds.warning_ratio)
                .then_some((ratio, claim.claim_number.as_str(), insured, carrier))
        })
        .collect();
    let (worst_ratio, number, insured, carrier) = *gaps.iter().max_by(|a, b| {
        a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal)
    })?;

    let mut trigger = Trigger::new(
        "When the carrier's estimate sits far below the insured scope, settling at the \
         carrier number locks in the gap as an uninsured loss.",
    )
    .fact(facts::labeled(
        &format!("Claim {number} insured estimate"),
        facts::money(insured),
    ))
    .fact(facts::labeled(
        &format!("Claim {number} carrier estimate"),
        facts::money(carrier),
    ))
    .fact(facts::labeled("Estimate gap", facts::percent(worst_ratio)))
    .fact(facts::count("Claims with material gaps", gaps.len()));
    if worst_ratio >= thresholds.critical_ratio {
        trigger = trigger.escalate(Severity::Critical);
    }
    Some(trigger.action(
        "Commission an independent scope review",
        format!(
            "The worst gap is {} across {} claim(s) over the materiality threshold.",
            facts::percent(worst_ratio),
            gaps.len()
        ),
    ))
}
