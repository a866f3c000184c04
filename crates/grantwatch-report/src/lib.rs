use std::fs;
use std::path::{Path, PathBuf};

use grantwatch_core::{ChangeAction, ChangeSet};
use thiserror::Error;
use tracing::info;

mod console;
mod markdown;

pub use console::write_console_report;
pub use markdown::{ReportContext, write_markdown};

pub const HIGH_RISK_NOTE: &str = "Privileged role assignment";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to render report: {0}")]
    Render(#[source] std::io::Error),
    #[error("failed to write report {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn section_symbol(action: ChangeAction) -> &'static str {
    match action {
        ChangeAction::Add => "➕",
        ChangeAction::Modify => "🔄",
        ChangeAction::Remove => "➖",
    }
}

pub(crate) fn section_title(action: ChangeAction) -> &'static str {
    match action {
        ChangeAction::Add => "Additions",
        ChangeAction::Modify => "Modifications",
        ChangeAction::Remove => "Removals",
    }
}

/// Renders the markdown report fully in memory, then writes it in one call.
pub fn write_markdown_report(
    path: &Path,
    change_set: &ChangeSet,
    context: &ReportContext,
) -> Result<(), ReportError> {
    let mut rendered = Vec::new();
    write_markdown(change_set, context, &mut rendered).map_err(ReportError::Render)?;

    let write_error = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, rendered).map_err(write_error)?;

    info!(
        path = %path.display(),
        total_changes = change_set.summary().total_changes,
        "wrote markdown report"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::{TimeZone, Utc};
    use grantwatch_core::{ChangeSet, parse_plan};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn write_markdown_report_creates_missing_artifact_dir() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("staging/nested/rbac-changes.md");
        let plan = parse_plan(r#"{"resource_changes": []}"#).expect("parse plan");
        let context = ReportContext {
            generated_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            source: "plan.json".into(),
        };

        write_markdown_report(&path, &ChangeSet::from_plan(&plan), &context)
            .expect("write report");

        let content = fs::read_to_string(&path).expect("read report");
        assert!(content.starts_with("# RBAC Changes Report\n"));
        assert!(content.contains("**Review Checklist:**"));
    }

    #[test]
    fn write_markdown_report_reports_unwritable_path() {
        let temp = tempdir().expect("tempdir");
        let blocker = temp.path().join("not-a-dir");
        fs::write(&blocker, "file").expect("write blocker");
        let context = ReportContext {
            generated_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            source: "plan.json".into(),
        };

        let err = write_markdown_report(
            &blocker.join("rbac-changes.md"),
            &ChangeSet::default(),
            &context,
        )
        .expect_err("writing below a file should fail");
        assert!(matches!(err, ReportError::Write { .. }));
    }
}
