//! Guidance rule sets, one file per module.
//!
//! Each rule is a pure predicate-and-template function: it reads only the
//! snapshot fields relevant to its concern and returns a [`Trigger`] when the
//! concern applies, or `None`. Rules never short-circuit each other and fire
//! at most once per invocation. Declaration order within a module is the
//! documented tie-break order for the ranking stage.

pub mod facts;

pub(crate) mod equity;
pub(crate) mod execution;
pub(crate) mod forensic;
pub(crate) mod insurance;
pub(crate) mod intelligence;

use crate::engine::{EngineConfig, Rule, Severity, Trigger};
use crate::snapshot::Snapshot;

/// Terminal guard shared by every module: without a property record nothing
/// else can be assessed, so this fires instead of all other rules.
pub(crate) const PROP_NOT_SELECTED: Rule = Rule {
    id: "PROP_NOT_SELECTED",
    severity: Severity::Critical,
    title: "No property selected",
    terminal: true,
    check: no_property,
};

fn no_property(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    if snapshot.property.is_some() {
        return None;
    }
    Some(
        Trigger::new(
            "Inspections, claims, contractor work, and equity tracking all hang off a \
             property record; none of them can be assessed until one is selected.",
        )
        .fact(facts::missing("property"))
        .action(
            "Select or create the property record",
            "Guidance is scoped to a single property; with none on file no other gap \
             can be evaluated.",
        ),
    )
}

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::snapshot::{
        CarrierInteraction, CheckpointStatus, Claim, ClaimMilestone, ComplianceCheckpoint,
        ContractorAssignment, EquityOutcome, EvidenceItem, EvidenceKind, InteractionChannel,
        Property, Snapshot, VerificationStatus,
    };

    pub(crate) fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn property() -> Property {
        Property {
            label: "Harborview Plaza".into(),
            address_line1: Some("12 Pier Rd".into()),
            city: Some("Gulfport".into()),
            region: Some("MS".into()),
            postal_code: Some("39501".into()),
            storm_date: Some(day(2026, 6, 14)),
        }
    }

    /// A valid case with a fully populated property and nothing else on file.
    pub(crate) fn base_snapshot() -> Snapshot {
        Snapshot {
            case_id: "CASE-1001".into(),
            as_of: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
            property: Some(property()),
            evidence_items: Vec::new(),
            inspections: Vec::new(),
            claims: Vec::new(),
            carrier_interactions: Vec::new(),
            compliance_checkpoints: Vec::new(),
            contractor_assignments: Vec::new(),
            equity_outcome: None,
        }
    }

    pub(crate) fn evidence(kind: EvidenceKind, verification: VerificationStatus) -> EvidenceItem {
        EvidenceItem {
            kind,
            verification,
            captured_at: Utc.with_ymd_and_hms(2026, 7, 2, 9, 30, 0).unwrap(),
            label: "artifact".into(),
        }
    }

    pub(crate) fn claim(number: &str, milestone: ClaimMilestone) -> Claim {
        Claim {
            claim_number: number.into(),
            milestone,
            blocked: false,
            insured_estimate_cents: None,
            carrier_estimate_cents: None,
        }
    }

    pub(crate) fn interaction(follow_up_due: Option<NaiveDate>, resolved: bool) -> CarrierInteraction {
        CarrierInteraction {
            occurred_on: day(2026, 7, 10),
            channel: InteractionChannel::Call,
            follow_up_due,
            resolved,
            summary: "adjuster call".into(),
        }
    }

    pub(crate) fn checkpoint(name: &str, status: CheckpointStatus) -> ComplianceCheckpoint {
        ComplianceCheckpoint {
            name: name.into(),
            status,
            due: Some(day(2026, 7, 20)),
        }
    }

    pub(crate) fn assignment(contractor: &str, completion_percent: u8) -> ContractorAssignment {
        ContractorAssignment {
            contractor: contractor.into(),
            scope: "storm remediation".into(),
            completion_percent,
            active: true,
        }
    }

    pub(crate) fn outcome(pre: i64, post: i64, liens: i64) -> EquityOutcome {
        EquityOutcome {
            recorded_on: day(2026, 7, 30),
            pre_storm_value_cents: pre,
            post_remediation_value_cents: post,
            outstanding_liens_cents: liens,
        }
    }
}
