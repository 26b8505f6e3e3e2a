//! The typed, read-only view of one case's state that the engine consumes.
//!
//! A snapshot is produced by an external data-access layer, consumed exactly
//! once, and discarded. The engine never mutates it; every derived value
//! (counts, ratios) is computed fresh per invocation. Decode and validation
//! errors become [`SnapshotError`] instead of guidance text with holes in it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Immutable, per-invocation aggregate of one case's domain state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub case_id: String,
    /// Reference instant for "overdue" computations. Supplied by the data
    /// layer so the engine never reads the wall clock.
    pub as_of: DateTime<Utc>,
    /// Absence is itself meaningful: it fires the terminal rule.
    pub property: Option<Property>,
    pub evidence_items: Vec<EvidenceItem>,
    pub inspections: Vec<Inspection>,
    pub claims: Vec<Claim>,
    pub carrier_interactions: Vec<CarrierInteraction>,
    pub compliance_checkpoints: Vec<ComplianceCheckpoint>,
    pub contractor_assignments: Vec<ContractorAssignment>,
    pub equity_outcome: Option<EquityOutcome>,
}

impl Snapshot {
    /// Decode a snapshot from the JSON the data layer hands over.
    pub fn from_json(value: serde_json::Value) -> Result<Self, SnapshotError> {
        serde_json::from_value(value).map_err(|err| SnapshotError::Decode {
            detail: err.to_string(),
        })
    }

    /// Decode a snapshot from raw JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(raw).map_err(|err| SnapshotError::Decode {
            detail: err.to_string(),
        })
    }

    /// Semantic validation beyond what the schema can express. A failure
    /// aborts the whole invocation: a partially evaluated guidance set could
    /// omit a critical risk.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.case_id.trim().is_empty() {
            return Err(SnapshotError::BlankCaseId);
        }
        for assignment in &self.contractor_assignments {
            if assignment.completion_percent > 100 {
                return Err(SnapshotError::CompletionOutOfRange {
                    contractor: assignment.contractor.clone(),
                    percent: assignment.completion_percent,
                });
            }
        }
        for claim in &self.claims {
            for (label, amount) in [
                ("insured estimate", claim.insured_estimate_cents),
                ("carrier estimate", claim.carrier_estimate_cents),
            ] {
                if let Some(amount_cents) = amount {
                    if amount_cents < 0 {
                        return Err(SnapshotError::NegativeAmount {
                            field: format!("claim {} {label}", claim.claim_number),
                            amount_cents,
                        });
                    }
                }
            }
        }
        if let Some(outcome) = &self.equity_outcome {
            for (field, amount_cents) in [
                ("pre-storm value", outcome.pre_storm_value_cents),
                ("post-remediation value", outcome.post_remediation_value_cents),
                ("outstanding liens", outcome.outstanding_liens_cents),
            ] {
                if amount_cents < 0 {
                    return Err(SnapshotError::NegativeAmount {
                        field: field.to_string(),
                        amount_cents,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn evidence_count_of(&self, kind: EvidenceKind) -> usize {
        self.evidence_items
            .iter()
            .filter(|item| item.kind == kind)
            .count()
    }

    pub fn evidence_count_by_status(&self, status: VerificationStatus) -> usize {
        self.evidence_items
            .iter()
            .filter(|item| item.verification == status)
            .count()
    }

    /// Photo plus video items.
    pub fn media_count(&self) -> usize {
        self.evidence_count_of(EvidenceKind::Photo) + self.evidence_count_of(EvidenceKind::Video)
    }
}

/// The commercial property a case is scoped to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub label: String,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub storm_date: Option<NaiveDate>,
}

impl Property {
    /// Address fields that are absent or blank, in schema order. Blank
    /// strings count as missing.
    pub fn missing_address_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.address_line1) {
            missing.push("address_line1");
        }
        if blank(&self.city) {
            missing.push("city");
        }
        if blank(&self.region) {
            missing.push("region");
        }
        missing
    }
}

fn blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |value| value.trim().is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Photo,
    Video,
    Document,
    Measurement,
    Note,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Unverified,
    Verified,
    Rejected,
}

/// One captured artifact documenting storm damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub kind: EvidenceKind,
    pub verification: VerificationStatus,
    pub captured_at: DateTime<Utc>,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionStatus {
    Scheduled,
    Completed,
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    pub inspector: String,
    pub status: InspectionStatus,
    pub scheduled_for: Option<NaiveDate>,
    pub completed_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimMilestone {
    Filed,
    Acknowledged,
    Inspected,
    Estimated,
    Approved,
    Paid,
}

impl ClaimMilestone {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Filed => "filed",
            Self::Acknowledged => "acknowledged",
            Self::Inspected => "inspected",
            Self::Estimated => "estimated",
            Self::Approved => "approved",
            Self::Paid => "paid",
        }
    }
}

/// One insurance claim. Amounts are integer cents so fact strings stay exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_number: String,
    pub milestone: ClaimMilestone,
    #[serde(default)]
    pub blocked: bool,
    pub insured_estimate_cents: Option<i64>,
    pub carrier_estimate_cents: Option<i64>,
}

impl Claim {
    /// Relative delta between the insured and carrier estimates, when both
    /// are present and the insured estimate is positive.
    pub fn scope_gap_ratio(&self) -> Option<f64> {
        let insured = self.insured_estimate_cents?;
        let carrier = self.carrier_estimate_cents?;
        if insured <= 0 {
            return None;
        }
        Some((insured - carrier).abs() as f64 / insured as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionChannel {
    Call,
    Email,
    Letter,
    Portal,
}

/// One logged touchpoint with the insurance carrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierInteraction {
    pub occurred_on: NaiveDate,
    pub channel: InteractionChannel,
    pub follow_up_due: Option<NaiveDate>,
    #[serde(default)]
    pub resolved: bool,
    pub summary: String,
}

impl CarrierInteraction {
    pub fn follow_up_overdue(&self, as_of: NaiveDate) -> bool {
        !self.resolved && self.follow_up_due.is_some_and(|due| due < as_of)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointStatus {
    Met,
    Pending,
    AtRisk,
    Missed,
}

impl CheckpointStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Met => "met",
            Self::Pending => "pending",
            Self::AtRisk => "at_risk",
            Self::Missed => "missed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheckpoint {
    pub name: String,
    pub status: CheckpointStatus,
    pub due: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractorAssignment {
    pub contractor: String,
    pub scope: String,
    pub completion_percent: u8,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Final equity position for the property, recorded at case closeout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityOutcome {
    pub recorded_on: NaiveDate,
    pub pre_storm_value_cents: i64,
    pub post_remediation_value_cents: i64,
    pub outstanding_liens_cents: i64,
}

impl EquityOutcome {
    /// Post-remediation value as a share of pre-storm value.
    pub fn recovery_ratio(&self) -> Option<f64> {
        if self.pre_storm_value_cents <= 0 {
            return None;
        }
        Some(self.post_remediation_value_cents as f64 / self.pre_storm_value_cents as f64)
    }
}

/// Errors raised while decoding or validating a snapshot at the engine
/// boundary.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapshotError {
    #[error("snapshot does not match the expected schema: {detail}")]
    Decode { detail: String },
    #[error("snapshot case id must not be blank")]
    BlankCaseId,
    #[error("assignment for `{contractor}` has completion {percent}% (expected 0..=100)")]
    CompletionOutOfRange { contractor: String, percent: u8 },
    #[error("{field} must not be negative (got {amount_cents} cents)")]
    NegativeAmount { field: String, amount_cents: i64 },
}
