use std::fmt::Write;

use crate::engine::GuidanceReport;

/// Format styles supported in default reporter implementations.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Produce a report string from a `GuidanceReport` using the desired format.
pub fn render_report(report: &GuidanceReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Human => render_human(report),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

fn render_human(report: &GuidanceReport) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "Module: {}", report.module)?;
    writeln!(out, "{}", report.summary)?;

    for item in &report.items {
        writeln!(out)?;
        writeln!(
            out,
            "[{severity}] {title} ({id})",
            severity = item.severity.as_str().to_uppercase(),
            title = item.title,
            id = item.id,
        )?;
        writeln!(out, "  Why it matters: {}", item.why_it_matters)?;
        writeln!(out, "  Facts:")?;
        for fact in &item.grounded_facts {
            writeln!(out, "    - {fact}")?;
        }
        if !item.recommended_actions.is_empty() {
            writeln!(out, "  Recommended actions:")?;
            for action in &item.recommended_actions {
                writeln!(out, "    - {}: {}", action.label, action.rationale)?;
            }
        }
    }

    if report.is_partial() {
        writeln!(out)?;
        writeln!(out, "Diagnostics (result is partial):")?;
        for diagnostic in &report.diagnostics {
            writeln!(out, "  - {}: {}", diagnostic.rule_id, diagnostic.message)?;
        }
    }

    Ok(out)
}
