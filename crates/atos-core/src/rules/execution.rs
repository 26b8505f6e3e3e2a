//! Execution module: contractor and compliance posture.

use crate::engine::{EngineConfig, Rule, Severity, Trigger};
use crate::snapshot::{CheckpointStatus, Snapshot};

use super::{facts, PROP_NOT_SELECTED};

pub(crate) const RULES: &[Rule] = &[
    PROP_NOT_SELECTED,
    Rule {
        id: "EXEC_NO_ASSIGNMENTS",
        severity: Severity::Warning,
        title: "No contractor assignments",
        terminal: false,
        check: no_assignments,
    },
    Rule {
        id: "EXEC_ASSIGNMENT_LAGGING",
        severity: Severity::Warning,
        title: "Assignments below completion floor",
        terminal: false,
        check: assignment_lagging,
    },
    Rule {
        id: "EXEC_CHECKPOINT_UNMET",
        severity: Severity::Warning,
        title: "Compliance checkpoints not met",
        terminal: false,
        check: checkpoint_unmet,
    },
];

fn no_assignments(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    if !snapshot.contractor_assignments.is_empty() {
        return None;
    }
    Some(
        Trigger::new(
            "Approved scope with nobody assigned to execute it is schedule risk that \
             grows quietly.",
        )
        .fact(facts::count("Contractor assignments", 0))
        .action(
            "Assign a contractor",
            "No contractor assignments are on file.",
        ),
    )
}

fn assignment_lagging(snapshot: &Snapshot, config: &EngineConfig) -> Option<Trigger> {
    let floor = config.completion_floor_percent;
    let lagging: Vec<_> = snapshot
        .contractor_assignments
        .iter()
        .filter(|assignment| assignment.active && assignment.completion_percent < floor)
        .collect();
    if lagging.is_empty() {
        return None;
    }
    let mut trigger = Trigger::new(
        "Assignments stuck below the completion floor signal stalled work or \
         unreported blockers on site.",
    )
    .fact(facts::count(
        &format!("Assignments below {floor}% completion"),
        lagging.len(),
    ));
    for assignment in &lagging {
        trigger = trigger.fact(facts::labeled(
            &format!("{} completion", assignment.contractor),
            format!("{}%", assignment.completion_percent),
        ));
    }
    Some(trigger.action(
        "Review stalled assignments with contractors",
        format!(
            "{} active assignment(s) are under {floor}% complete.",
            lagging.len()
        ),
    ))
}

fn checkpoint_unmet(snapshot: &Snapshot, _config: &EngineConfig) -> Option<Trigger> {
    let unmet: Vec<_> = snapshot
        .compliance_checkpoints
        .iter()
        .filter(|checkpoint| checkpoint.status != CheckpointStatus::Met)
        .collect();
    if unmet.is_empty() {
        return None;
    }
    let missed = unmet
        .iter()
        .filter(|checkpoint| checkpoint.status == CheckpointStatus::Missed)
        .count();
    let mut trigger = Trigger::new(
        "Compliance checkpoints gate payment releases; unmet ones turn into clawbacks \
         at closeout.",
    )
    .fact(facts::count("Checkpoints not met", unmet.len()))
    .fact(facts::count("Missed checkpoints", missed));
    for checkpoint in &unmet {
        trigger = trigger.fact(facts::labeled(
            &format!("Checkpoint {}", checkpoint.name),
            checkpoint.status.as_str(),
        ));
    }
    if missed > 0 {
        trigger = trigger.escalate(Severity::Critical);
    }
    Some(trigger.action(
        "Bring checkpoints back into compliance",
        format!("{} checkpoint(s) are not in a met state.", unmet.len()),
    ))
}
