use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use grantwatch_config::ReviewConfig;
use grantwatch_core::{ChangeSet, Summary, load_plan};
use grantwatch_report::{ReportContext, write_console_report, write_markdown_report};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub summary: Summary,
    pub report_path: PathBuf,
}

pub fn run_review(
    plan_path: &Path,
    config: &ReviewConfig,
    out: &mut dyn Write,
) -> Result<ReviewOutcome> {
    let plan = load_plan(plan_path).context("failed to load plan")?;
    info!(
        path = %plan_path.display(),
        resource_changes = plan.resource_changes.len(),
        "loaded plan"
    );

    let change_set = ChangeSet::from_plan(&plan);
    let summary = *change_set.summary();
    info!(
        total_changes = summary.total_changes,
        high_risk_changes = summary.high_risk_changes,
        "classified RBAC changes"
    );

    write_console_report(&change_set, out).context("failed to write console report")?;

    let report_path = config.report_path();
    write_markdown_report(&report_path, &change_set, &ReportContext::now(plan_path))
        .context("failed to generate markdown report")?;
    writeln!(out, "\n✓ Markdown report generated: {}", report_path.display())?;

    if change_set.has_high_risk() {
        writeln!(
            out,
            "\n⚠️  WARNING: High-risk changes detected. Please review carefully."
        )?;
    }

    Ok(ReviewOutcome {
        summary,
        report_path,
    })
}
