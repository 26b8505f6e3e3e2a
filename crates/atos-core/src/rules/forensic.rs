//! Forensic module: property and evidence posture.

use crate::engine::{EngineConfig, Rule, Severity, Trigger};
use crate::snapshot::{EvidenceKind, Snapshot, VerificationStatus};

use super::{facts, PROP_NOT_SELECTED};

pub(crate) const RULES: &[Rule] = &[
    PROP_NOT_SELECTED,
    Rule {
        id: "EVID_NONE",
        severity: Severity::Critical,
        title: "No evidence captured",
        terminal: false,
        check: no_evidence,
    },
    Rule {
        id: "PROP_ADDRESS_INCOMPLETE",
        severity: Severity::Warning,
        title: "Property address incomplete",
        terminal: false,
        check: address_incomplete,
    },
    Rule {
        id: "EVID_UNVERIFIED",
        severity: Severity::Warning,
        title: "Unverified evidence on file",
        terminal: false,
        check: unverified_evidence,
    },
    Rule {
        id: "EVID_NO_MEDIA",
        severity: Severity::Warning,
        title: "No media evidence",
        terminal: false,
        check: no_media,
    },
    Rule {
        id: "EVID_NO_DOCS",
        severity: Severity::Info,
        title: "No supporting documents",
        terminal: false,
        check: no_documents,
    },
];

fn no_evidence(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    if !snapshot.evidence_items.is_empty() {
        return None;
    }
    Some(
        Trigger::new(
            "Without captured evidence the damage narrative cannot be substantiated to a \
             carrier, and the claim value rests on recollection alone.",
        )
        .fact(facts::count("Evidence items", 0))
        .action(
            "Capture photo and video documentation",
            "The evidence list is empty; dated media is the baseline for any damage assessment.",
        )
        .action(
            "Collect supporting documents",
            "Invoices, policies, and inspection reports anchor the claim once media exists.",
        ),
    )
}

fn address_incomplete(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    let property = snapshot.property.as_ref()?;
    let missing = property.missing_address_fields();
    if missing.is_empty() {
        return None;
    }
    let mut trigger = Trigger::new(
        "Carriers and inspectors match records by address; an incomplete one stalls \
         scheduling and claim correspondence.",
    );
    for field in &missing {
        trigger = trigger.fact(facts::missing(field));
    }
    Some(trigger.action(
        "Complete the property address",
        format!("{} address field(s) are missing.", missing.len()),
    ))
}

fn unverified_evidence(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    if snapshot.evidence_items.is_empty() {
        return None;
    }
    let unverified = snapshot.evidence_count_by_status(VerificationStatus::Unverified);
    let rejected = snapshot.evidence_count_by_status(VerificationStatus::Rejected);
    if unverified + rejected == 0 {
        return None;
    }
    Some(
        Trigger::new(
            "Evidence that has not passed verification carries no weight in a dispute; \
             rejected items can actively undermine credibility.",
        )
        .fact(facts::count("Unverified", unverified))
        .fact(facts::count("Rejected", rejected))
        .action(
            "Verify provenance for key artifacts",
            format!(
                "{} item(s) have not passed verification.",
                unverified + rejected
            ),
        ),
    )
}

fn no_media(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    if snapshot.evidence_items.is_empty() || snapshot.media_count() > 0 {
        return None;
    }
    Some(
        Trigger::new(
            "Documents and notes describe damage; photos and video prove it. Carriers \
             discount claims without visual substantiation.",
        )
        .fact(facts::count(
            "Photo evidence items",
            snapshot.evidence_count_of(EvidenceKind::Photo),
        ))
        .fact(facts::count(
            "Video evidence items",
            snapshot.evidence_count_of(EvidenceKind::Video),
        ))
        .fact(facts::count(
            "Total evidence items",
            snapshot.evidence_items.len(),
        ))
        .action(
            "Photograph and film the damage",
            "All evidence on file is non-visual.",
        ),
    )
}

fn no_documents(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    if snapshot.evidence_items.is_empty()
        || snapshot.evidence_count_of(EvidenceKind::Document) > 0
    {
        return None;
    }
    Some(
        Trigger::new(
            "Media shows the damage; documents (policies, invoices, reports) establish \
             value and coverage.",
        )
        .fact(facts::count("Document evidence items", 0))
        .action(
            "Attach policy and repair documents",
            "No document-type evidence is on file.",
        ),
    )
}
