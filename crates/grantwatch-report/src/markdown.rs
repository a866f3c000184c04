use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use grantwatch_core::{ChangeFields, ChangeSet, render_fields};

use crate::{HIGH_RISK_NOTE, section_symbol, section_title};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

const REVIEW_CHECKLIST: [&str; 5] = [
    "All changes are authorized and documented",
    "High-risk changes have been reviewed by security team",
    "Change ticket number: _______________",
    "Approved by: _______________",
    "Date: _______________",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    pub generated_at: DateTime<Utc>,
    pub source: PathBuf,
}

impl ReportContext {
    pub fn now(source: impl Into<PathBuf>) -> Self {
        Self {
            generated_at: Utc::now(),
            source: source.into(),
        }
    }
}

pub fn write_markdown(
    change_set: &ChangeSet,
    context: &ReportContext,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    let summary = change_set.summary();

    writeln!(out, "# RBAC Changes Report\n")?;
    writeln!(
        out,
        "**Generated:** {}  ",
        context.generated_at.format(TIMESTAMP_FORMAT)
    )?;
    writeln!(out, "**Source:** `{}`\n", context.source.display())?;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total Changes:** {}", summary.total_changes)?;
    writeln!(out, "- **High-Risk Changes:** {}", summary.high_risk_changes)?;
    writeln!(out, "- **Role Assignments:** {}", summary.role_assignments)?;
    writeln!(out, "- **Custom Roles:** {}", summary.custom_roles)?;
    writeln!(out, "- **Entra ID Groups:** {}\n", summary.groups)?;

    if change_set.has_high_risk() {
        writeln!(
            out,
            "⚠️ **WARNING:** This plan contains high-risk changes (Owner or User Access Administrator roles)\n"
        )?;
    }

    for (action, changes) in change_set.sections() {
        writeln!(
            out,
            "## {} {} ({})\n",
            section_symbol(action),
            section_title(action),
            changes.len()
        )?;

        for change in changes {
            let view = render_fields(change);
            writeln!(out, "### `{}`\n", view.address)?;
            writeln!(out, "**Type:** {}  ", view.kind.type_tag())?;
            write_fields(&view.fields, out)?;
            writeln!(out)?;
        }
    }

    writeln!(out, "\n---\n")?;
    writeln!(out, "**Review Checklist:**")?;
    for item in REVIEW_CHECKLIST {
        writeln!(out, "- [ ] {item}")?;
    }
    Ok(())
}

fn write_fields(fields: &ChangeFields, out: &mut dyn Write) -> std::io::Result<()> {
    match fields {
        ChangeFields::RoleAssignment {
            role,
            scope,
            principal,
            high_risk,
        } => {
            writeln!(out, "**Role:** {role}  ")?;
            writeln!(out, "**Scope:** {scope}  ")?;
            writeln!(out, "**Principal:** {principal}  ")?;
            if *high_risk {
                writeln!(out, "\n⚠️ **HIGH RISK:** {HIGH_RISK_NOTE}")?;
            }
        }
        ChangeFields::Group {
            display_name,
            description,
        } => {
            writeln!(out, "**Group Name:** {display_name}  ")?;
            writeln!(out, "**Description:** {description}  ")?;
        }
        ChangeFields::RoleDefinition {
            name,
            description,
            permission_count,
        } => {
            writeln!(out, "**Role Name:** {name}  ")?;
            writeln!(out, "**Description:** {description}  ")?;
            if *permission_count > 0 {
                writeln!(out, "**Actions:** {permission_count} permissions  ")?;
            }
        }
        ChangeFields::DirectoryRoleAssignment => {}
    }
    Ok(())
}
