pub mod catalog;
mod change_set;
mod classify;
mod extract;
mod plan;

pub use change_set::{ChangeSet, Summary};
pub use classify::{
    ChangeAction, Classification, ClassifiedChange, DIRECTORY_ROLE_ASSIGNMENT_TYPE, GROUP_TYPE,
    ROLE_ASSIGNMENT_TYPE, ROLE_DEFINITION_TYPE, ResourceKind, SkipReason, classify, is_high_risk,
    requested_role,
};
pub use extract::{
    CUSTOM_ROLE, ChangeFields, ELLIPSIS, NOT_AVAILABLE, NormalizedView, UNKNOWN, format_principal,
    format_scope, permission_count, render_fields, resolve_role_name, text_attribute,
};
pub use plan::{
    PlanDocument, PlanError, PlannedChange, RawChangeRecord, load_plan, parse_plan,
    parse_plan_slice,
};
