use atos_core::{
    GuidanceEngine, GuidanceError, Module, Severity, Snapshot, SnapshotError,
};
use atos_core::snapshot::{
    CarrierInteraction, Claim, ClaimMilestone, ContractorAssignment, EvidenceItem, EvidenceKind,
    InteractionChannel, Property, VerificationStatus,
};
use chrono::{NaiveDate, TimeZone, Utc};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn full_property() -> Property {
    Property {
        label: "Harborview Plaza".into(),
        address_line1: Some("12 Pier Rd".into()),
        city: Some("Gulfport".into()),
        region: Some("MS".into()),
        postal_code: Some("39501".into()),
        storm_date: Some(day(2026, 6, 14)),
    }
}

fn snapshot_with(property: Option<Property>) -> Snapshot {
    Snapshot {
        case_id: "CASE-7".into(),
        as_of: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
        property,
        evidence_items: Vec::new(),
        inspections: Vec::new(),
        claims: Vec::new(),
        carrier_interactions: Vec::new(),
        compliance_checkpoints: Vec::new(),
        contractor_assignments: Vec::new(),
        equity_outcome: None,
    }
}

fn evidence(kind: EvidenceKind, verification: VerificationStatus) -> EvidenceItem {
    EvidenceItem {
        kind,
        verification,
        captured_at: Utc.with_ymd_and_hms(2026, 7, 2, 9, 30, 0).unwrap(),
        label: "artifact".into(),
    }
}

#[test]
fn empty_evidence_with_full_address_yields_one_critical_item() {
    let engine = GuidanceEngine::new();
    let snapshot = snapshot_with(Some(full_property()));

    let report = engine.generate(Module::Forensic, &snapshot).unwrap();

    let critical: Vec<_> = report
        .items
        .iter()
        .filter(|item| item.severity == Severity::Critical)
        .collect();
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0].id, "EVID_NONE");
    assert_eq!(critical[0].title, "No evidence captured");
    assert!(report
        .items
        .iter()
        .all(|item| item.id != "PROP_ADDRESS_INCOMPLETE"));
    assert_eq!(report.items.len(), 1);
}

#[test]
fn unverified_and_missing_documents_rank_warning_before_info() {
    let engine = GuidanceEngine::new();
    let mut snapshot = snapshot_with(Some(full_property()));
    snapshot.evidence_items = vec![
        evidence(EvidenceKind::Photo, VerificationStatus::Verified),
        evidence(EvidenceKind::Photo, VerificationStatus::Verified),
        evidence(EvidenceKind::Video, VerificationStatus::Verified),
        evidence(EvidenceKind::Measurement, VerificationStatus::Unverified),
    ];

    let report = engine.generate(Module::Forensic, &snapshot).unwrap();

    let unverified = report
        .items
        .iter()
        .position(|item| item.id == "EVID_UNVERIFIED")
        .expect("unverified warning must fire");
    let no_docs = report
        .items
        .iter()
        .position(|item| item.id == "EVID_NO_DOCS")
        .expect("document info must fire");
    assert!(unverified < no_docs);
    assert_eq!(report.items[unverified].severity, Severity::Warning);
    assert_eq!(report.items[no_docs].severity, Severity::Info);
    assert!(report.items[unverified]
        .grounded_facts
        .contains(&"Unverified: 1".to_string()));
    assert!(report.items[no_docs]
        .grounded_facts
        .contains(&"Document evidence items: 0".to_string()));
}

#[test]
fn missing_property_yields_exactly_one_item_in_every_module() {
    let engine = GuidanceEngine::new();
    let mut snapshot = snapshot_with(None);
    // Other record sets are populated on purpose: the terminal rule must
    // suppress everything regardless of their content.
    snapshot.evidence_items = vec![evidence(
        EvidenceKind::Note,
        VerificationStatus::Unverified,
    )];
    snapshot.claims = vec![Claim {
        claim_number: "CLM-1".into(),
        milestone: ClaimMilestone::Filed,
        blocked: true,
        insured_estimate_cents: Some(1_000_000),
        carrier_estimate_cents: Some(100_000),
    }];

    for module in Module::ALL {
        let report = engine.generate(module, &snapshot).unwrap();
        assert_eq!(report.items.len(), 1, "module {module}");
        assert_eq!(report.items[0].id, "PROP_NOT_SELECTED");
        assert_eq!(report.items[0].severity, Severity::Critical);
    }
}

#[test]
fn identical_snapshots_serialize_identically() {
    let engine = GuidanceEngine::new();
    let mut snapshot = snapshot_with(Some(full_property()));
    snapshot.evidence_items = vec![evidence(
        EvidenceKind::Document,
        VerificationStatus::Unverified,
    )];
    snapshot.carrier_interactions = vec![CarrierInteraction {
        occurred_on: day(2026, 7, 10),
        channel: InteractionChannel::Email,
        follow_up_due: Some(day(2026, 7, 20)),
        resolved: false,
        summary: "requested revised estimate".into(),
    }];

    for module in Module::ALL {
        let first = engine.generate(module, &snapshot).unwrap();
        let second = engine.generate(module, &snapshot).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn address_facts_cite_only_the_missing_fields() {
    let engine = GuidanceEngine::new();
    let mut snapshot = snapshot_with(Some(Property {
        city: None,
        region: None,
        ..full_property()
    }));
    snapshot.evidence_items = vec![evidence(
        EvidenceKind::Photo,
        VerificationStatus::Verified,
    )];

    let report = engine.generate(Module::Forensic, &snapshot).unwrap();
    let address = report
        .items
        .iter()
        .find(|item| item.id == "PROP_ADDRESS_INCOMPLETE")
        .expect("address warning must fire");
    assert!(address.grounded_facts.contains(&"city: missing".to_string()));
    assert!(address
        .grounded_facts
        .contains(&"region: missing".to_string()));
    assert!(!address
        .grounded_facts
        .iter()
        .any(|fact| fact.contains("address_line1")));
}

#[test]
fn unknown_module_identifier_is_a_configuration_error() {
    let engine = GuidanceEngine::new();
    let snapshot = snapshot_with(Some(full_property()));
    let err = engine
        .generate_named("billing", &snapshot)
        .expect_err("unknown module must not yield an empty report");
    assert!(matches!(
        err,
        GuidanceError::UnknownModule { module } if module == "billing"
    ));
}

#[test]
fn malformed_snapshot_aborts_the_invocation() {
    let engine = GuidanceEngine::new();
    let mut snapshot = snapshot_with(Some(full_property()));
    snapshot.contractor_assignments = vec![ContractorAssignment {
        contractor: "Acme Roofing".into(),
        scope: "roof".into(),
        completion_percent: 180,
        active: true,
    }];

    let err = engine
        .generate(Module::Execution, &snapshot)
        .expect_err("out-of-range completion must abort");
    assert!(matches!(
        err,
        GuidanceError::MalformedSnapshot(SnapshotError::CompletionOutOfRange { .. })
    ));
}

#[test]
fn insurance_report_orders_critical_before_warning() {
    let engine = GuidanceEngine::new();
    let mut snapshot = snapshot_with(Some(full_property()));
    snapshot.claims = vec![
        Claim {
            claim_number: "CLM-88".into(),
            milestone: ClaimMilestone::Estimated,
            blocked: true,
            insured_estimate_cents: Some(4_825_000),
            carrier_estimate_cents: Some(3_100_000),
        },
        Claim {
            claim_number: "CLM-89".into(),
            milestone: ClaimMilestone::Acknowledged,
            blocked: false,
            insured_estimate_cents: None,
            carrier_estimate_cents: None,
        },
    ];
    snapshot.carrier_interactions = vec![CarrierInteraction {
        occurred_on: day(2026, 7, 1),
        channel: InteractionChannel::Call,
        follow_up_due: Some(day(2026, 7, 8)),
        resolved: false,
        summary: "adjuster promised revised estimate".into(),
    }];

    let report = engine.generate(Module::Insurance, &snapshot).unwrap();
    let ids: Vec<_> = report.items.iter().map(|item| item.id.as_str()).collect();
    // Blocked milestone and the escalated scope gap are both critical and
    // keep declaration order; the overdue follow-up trails as a warning.
    assert_eq!(
        ids,
        vec!["INS_MILESTONE_BLOCKED", "INS_SCOPE_GAP", "INS_FOLLOWUP_OVERDUE"]
    );
    let ranks: Vec<_> = report
        .items
        .iter()
        .map(|item| item.severity.rank())
        .collect();
    let mut sorted = ranks.clone();
    sorted.sort_unstable();
    assert_eq!(ranks, sorted);
    assert_eq!(
        report.summary,
        "3 guidance item(s): 2 critical, 1 warning, 0 info."
    );
}
