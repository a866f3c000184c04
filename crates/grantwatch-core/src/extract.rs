use serde_json::Value;

use crate::catalog::{find_embedded_role_name, well_known_role_name};
use crate::classify::{ChangeAction, ClassifiedChange, ResourceKind, requested_role};

pub const UNKNOWN: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";
pub const CUSTOM_ROLE: &str = "Custom Role";
pub const ELLIPSIS: &str = "...";

const PRINCIPAL_DISPLAY_LIMIT: usize = 16;
const SHORT_ID_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedView {
    pub action: ChangeAction,
    pub kind: ResourceKind,
    pub address: String,
    pub fields: ChangeFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeFields {
    RoleAssignment {
        role: String,
        scope: String,
        principal: String,
        high_risk: bool,
    },
    Group {
        display_name: String,
        description: String,
    },
    RoleDefinition {
        name: String,
        description: String,
        permission_count: usize,
    },
    DirectoryRoleAssignment,
}

pub fn render_fields(change: &ClassifiedChange) -> NormalizedView {
    let state = change.subject_state();
    let fields = match change.kind {
        ResourceKind::RoleAssignment => ChangeFields::RoleAssignment {
            role: resolve_role_name(requested_role(state).as_deref().unwrap_or_default()),
            scope: format_scope(text_attribute(state, "scope").as_deref().unwrap_or_default()),
            principal: format_principal(text_attribute(state, "principal_id").as_deref()),
            high_risk: change.high_risk,
        },
        ResourceKind::Group => ChangeFields::Group {
            display_name: text_or(state, "display_name", UNKNOWN),
            description: text_or(state, "description", NOT_AVAILABLE),
        },
        ResourceKind::RoleDefinition => ChangeFields::RoleDefinition {
            name: text_or(state, "name", UNKNOWN),
            description: text_or(state, "description", NOT_AVAILABLE),
            permission_count: permission_count(state),
        },
        ResourceKind::DirectoryRoleAssignment => ChangeFields::DirectoryRoleAssignment,
    };

    NormalizedView {
        action: change.action,
        kind: change.kind,
        address: change.address.clone(),
        fields,
    }
}

/// Reads a scalar attribute as display text. Null, empty, and compound values count as absent.
pub fn text_attribute(state: &Value, key: &str) -> Option<String> {
    match state.get(key)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn text_or(state: &Value, key: &str, default: &str) -> String {
    text_attribute(state, key).unwrap_or_else(|| default.to_owned())
}

pub fn resolve_role_name(role_id_or_name: &str) -> String {
    if role_id_or_name.is_empty() {
        return UNKNOWN.to_owned();
    }
    if let Some(name) = find_embedded_role_name(role_id_or_name) {
        return name.to_owned();
    }
    if role_id_or_name.contains("/roleDefinitions/") {
        let last = role_id_or_name.rsplit('/').next().unwrap_or_default();
        return well_known_role_name(last).unwrap_or(CUSTOM_ROLE).to_owned();
    }

    role_id_or_name.to_owned()
}

pub fn format_scope(scope: &str) -> String {
    if scope.is_empty() {
        return UNKNOWN.to_owned();
    }

    if scope.contains("/managementGroups/") {
        let name = scope.rsplit('/').next().unwrap_or_default();
        return format!("Management Group: {name}");
    }

    if scope.contains("/subscriptions/") {
        if scope.contains("/resourceGroups/") {
            let group = segment_after(scope, "resourceGroups").unwrap_or_default();
            return format!("Resource Group: {group}");
        }
        let subscription = segment_after(scope, "subscriptions").unwrap_or_default();
        return format!(
            "Subscription: {}{ELLIPSIS}",
            take_chars(subscription, SHORT_ID_LEN)
        );
    }

    scope.to_owned()
}

pub fn format_principal(principal: Option<&str>) -> String {
    match principal {
        None | Some("") => UNKNOWN.to_owned(),
        Some(id) if id.chars().count() > PRINCIPAL_DISPLAY_LIMIT => {
            format!("{}{ELLIPSIS}", take_chars(id, SHORT_ID_LEN))
        }
        Some(id) => id.to_owned(),
    }
}

/// Number of actions in the first permission block of a role definition.
pub fn permission_count(state: &Value) -> usize {
    state
        .get("permissions")
        .and_then(Value::as_array)
        .and_then(|blocks| blocks.first())
        .and_then(|block| block.get("actions"))
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

fn segment_after<'a>(path: &'a str, marker: &str) -> Option<&'a str> {
    let mut segments = path.split('/');
    segments.find(|segment| *segment == marker)?;
    segments.next()
}

fn take_chars(value: &str, count: usize) -> &str {
    match value.char_indices().nth(count) {
        Some((index, _)) => &value[..index],
        None => value,
    }
}
