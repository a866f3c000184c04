use std::io::Write;

use grantwatch_core::{ChangeFields, ChangeSet, render_fields};

use crate::{HIGH_RISK_NOTE, section_symbol, section_title};

const BANNER_WIDTH: usize = 80;

pub fn write_console_report(change_set: &ChangeSet, out: &mut dyn Write) -> std::io::Result<()> {
    let heavy = "=".repeat(BANNER_WIDTH);
    let light = "-".repeat(BANNER_WIDTH);
    let summary = change_set.summary();

    writeln!(out, "\n{heavy}")?;
    writeln!(out, "RBAC CHANGES DETECTED")?;
    writeln!(out, "{heavy}")?;
    writeln!(out, "\nTotal Changes: {}", summary.total_changes)?;
    writeln!(out, "High-Risk Changes: {}", summary.high_risk_changes)?;
    writeln!(out, "Role Assignments: {}", summary.role_assignments)?;
    writeln!(out, "Custom Roles: {}", summary.custom_roles)?;
    writeln!(out, "Entra ID Groups: {}", summary.groups)?;
    writeln!(out)?;

    for (action, changes) in change_set.sections() {
        writeln!(out, "\n{light}")?;
        writeln!(
            out,
            "{} {} ({})",
            section_symbol(action),
            section_title(action).to_uppercase(),
            changes.len()
        )?;
        writeln!(out, "{light}")?;

        for change in changes {
            let view = render_fields(change);
            writeln!(out, "\n{}: {}", view.action.label(), view.address)?;
            writeln!(out, "Type: {}", view.kind.type_tag())?;
            write_fields(&view.fields, out)?;
        }
    }

    writeln!(out, "\n{heavy}\n")?;
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
            writeln!(out, "  Role: {role}")?;
            writeln!(out, "  Scope: {scope}")?;
            writeln!(out, "  Principal: {principal}")?;
            if *high_risk {
                writeln!(out, "  ⚠️  HIGH RISK: {HIGH_RISK_NOTE}")?;
            }
        }
        ChangeFields::Group {
            display_name,
            description,
        } => {
            writeln!(out, "  Group: {display_name}")?;
            writeln!(out, "  Description: {description}")?;
        }
        ChangeFields::RoleDefinition {
            name,
            description,
            permission_count,
        } => {
            writeln!(out, "  Role Name: {name}")?;
            writeln!(out, "  Description: {description}")?;
            if *permission_count > 0 {
                writeln!(out, "  Actions: {permission_count} permissions")?;
            }
        }
        ChangeFields::DirectoryRoleAssignment => {}
    }
    Ok(())
}
