use serde_json::Value;

use crate::catalog::{OWNER_ROLE_ID, USER_ACCESS_ADMINISTRATOR_ROLE_ID};
use crate::extract::text_attribute;
use crate::plan::RawChangeRecord;

pub const ROLE_ASSIGNMENT_TYPE: &str = "azurerm_role_assignment";
pub const GROUP_TYPE: &str = "azuread_group";
pub const ROLE_DEFINITION_TYPE: &str = "azurerm_role_definition";
pub const DIRECTORY_ROLE_ASSIGNMENT_TYPE: &str = "azuread_directory_role_assignment";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    RoleAssignment,
    Group,
    RoleDefinition,
    DirectoryRoleAssignment,
}

impl ResourceKind {
    pub const ALL: [Self; 4] = [
        Self::RoleAssignment,
        Self::Group,
        Self::RoleDefinition,
        Self::DirectoryRoleAssignment,
    ];

    pub fn from_type_tag(tag: &str) -> Option<Self> {
        match tag {
            ROLE_ASSIGNMENT_TYPE => Some(Self::RoleAssignment),
            GROUP_TYPE => Some(Self::Group),
            ROLE_DEFINITION_TYPE => Some(Self::RoleDefinition),
            DIRECTORY_ROLE_ASSIGNMENT_TYPE => Some(Self::DirectoryRoleAssignment),
            _ => None,
        }
    }

    pub fn type_tag(self) -> &'static str {
        match self {
            Self::RoleAssignment => ROLE_ASSIGNMENT_TYPE,
            Self::Group => GROUP_TYPE,
            Self::RoleDefinition => ROLE_DEFINITION_TYPE,
            Self::DirectoryRoleAssignment => DIRECTORY_ROLE_ASSIGNMENT_TYPE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeAction {
    Add,
    Modify,
    Remove,
}

impl ChangeAction {
    /// Section order shared by every renderer.
    pub const ORDERED: [Self; 3] = [Self::Add, Self::Modify, Self::Remove];

    pub fn from_verbs(record: &RawChangeRecord) -> Option<Self> {
        if record.has_action("create") {
            Some(Self::Add)
        } else if record.has_action("delete") {
            Some(Self::Remove)
        } else if record.has_action("update") {
            Some(Self::Modify)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Modify => "MODIFY",
            Self::Remove => "REMOVE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedChange {
    pub action: ChangeAction,
    pub kind: ResourceKind,
    pub address: String,
    pub before: Value,
    pub after: Value,
    pub high_risk: bool,
}

impl ClassifiedChange {
    /// The state a change is described by: `before` for removals, `after` otherwise.
    pub fn subject_state(&self) -> &Value {
        match self.action {
            ChangeAction::Remove => &self.before,
            ChangeAction::Add | ChangeAction::Modify => &self.after,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnmonitoredType,
    NoRecognizedAction,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnmonitoredType => "unmonitored_type",
            Self::NoRecognizedAction => "no_recognized_action",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Included(ClassifiedChange),
    Skipped(SkipReason),
}

pub fn classify(record: &RawChangeRecord) -> Classification {
    let Some(kind) = ResourceKind::from_type_tag(&record.resource_type) else {
        return Classification::Skipped(SkipReason::UnmonitoredType);
    };
    let Some(action) = ChangeAction::from_verbs(record) else {
        return Classification::Skipped(SkipReason::NoRecognizedAction);
    };

    Classification::Included(ClassifiedChange {
        action,
        kind,
        address: record.address.clone(),
        before: record.change.before.clone(),
        after: record.change.after.clone(),
        high_risk: is_high_risk(kind, &record.change.after),
    })
}

/// Role id (or role name) read from a role assignment's after-state.
pub fn requested_role(after: &Value) -> Option<String> {
    text_attribute(after, "role_definition_id")
        .or_else(|| text_attribute(after, "role_definition_name"))
}

pub fn is_high_risk(kind: ResourceKind, after: &Value) -> bool {
    if kind != ResourceKind::RoleAssignment {
        return false;
    }
    let Some(role) = requested_role(after) else {
        return false;
    };

    role.contains(OWNER_ROLE_ID)
        || role.contains("Owner")
        || role.contains(USER_ACCESS_ADMINISTRATOR_ROLE_ID)
}
