use tracing::{debug, warn};

use crate::classify::{ChangeAction, Classification, ClassifiedChange, ResourceKind, classify};
use crate::plan::{PlanDocument, RawChangeRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_changes: usize,
    pub high_risk_changes: usize,
    pub role_assignments: usize,
    pub custom_roles: usize,
    pub groups: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    additions: Vec<ClassifiedChange>,
    modifications: Vec<ClassifiedChange>,
    removals: Vec<ClassifiedChange>,
    summary: Summary,
}

impl ChangeSet {
    pub fn from_plan(plan: &PlanDocument) -> Self {
        Self::from_records(&plan.resource_changes)
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a RawChangeRecord>) -> Self {
        let mut change_set = Self::default();
        for record in records {
            match classify(record) {
                Classification::Included(change) => change_set.push(change),
                Classification::Skipped(reason) => debug!(
                    address = %record.address,
                    resource_type = %record.resource_type,
                    reason = reason.as_str(),
                    "skipping resource change"
                ),
            }
        }
        change_set
    }

    fn push(&mut self, change: ClassifiedChange) {
        self.summary.total_changes += 1;
        match change.kind {
            ResourceKind::RoleAssignment => {
                self.summary.role_assignments += 1;
                if change.high_risk {
                    self.summary.high_risk_changes += 1;
                    warn!(address = %change.address, "high-risk role assignment in plan");
                }
            }
            ResourceKind::RoleDefinition => self.summary.custom_roles += 1,
            ResourceKind::Group => self.summary.groups += 1,
            ResourceKind::DirectoryRoleAssignment => {}
        }

        match change.action {
            ChangeAction::Add => self.additions.push(change),
            ChangeAction::Modify => self.modifications.push(change),
            ChangeAction::Remove => self.removals.push(change),
        }
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn changes(&self, action: ChangeAction) -> &[ClassifiedChange] {
        match action {
            ChangeAction::Add => &self.additions,
            ChangeAction::Modify => &self.modifications,
            ChangeAction::Remove => &self.removals,
        }
    }

    /// Non-empty sections in render order.
    pub fn sections(&self) -> impl Iterator<Item = (ChangeAction, &[ClassifiedChange])> {
        ChangeAction::ORDERED
            .into_iter()
            .map(|action| (action, self.changes(action)))
            .filter(|(_, changes)| !changes.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.summary.total_changes == 0
    }

    pub fn has_high_risk(&self) -> bool {
        self.summary.high_risk_changes > 0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::catalog::{OWNER_ROLE_ID, READER_ROLE_ID};
    use crate::classify::{
        DIRECTORY_ROLE_ASSIGNMENT_TYPE, GROUP_TYPE, ROLE_ASSIGNMENT_TYPE, ROLE_DEFINITION_TYPE,
    };
    use crate::plan::PlannedChange;

    fn record(
        resource_type: &str,
        address: &str,
        actions: &[&str],
        before: Value,
        after: Value,
    ) -> RawChangeRecord {
        RawChangeRecord {
            resource_type: resource_type.to_owned(),
            address: address.to_owned(),
            change: PlannedChange {
                actions: actions.iter().map(|action| (*action).to_owned()).collect(),
                before,
                after,
            },
        }
    }

    fn addresses(changes: &[ClassifiedChange]) -> Vec<&str> {
        changes.iter().map(|change| change.address.as_str()).collect()
    }

    #[test]
    fn counts_each_monitored_type() {
        let records = vec![
            record(
                ROLE_ASSIGNMENT_TYPE,
                "ra.reader",
                &["create"],
                Value::Null,
                json!({ "role_definition_id": READER_ROLE_ID }),
            ),
            record(ROLE_DEFINITION_TYPE, "rd.custom", &["update"], json!({}), json!({})),
            record(GROUP_TYPE, "g.admins", &["delete"], json!({}), Value::Null),
            record(
                DIRECTORY_ROLE_ASSIGNMENT_TYPE,
                "dra.global",
                &["create"],
                Value::Null,
                json!({}),
            ),
            record("azurerm_storage_account", "sa.logs", &["create"], Value::Null, json!({})),
            record(GROUP_TYPE, "g.readers", &["no-op"], json!({}), json!({})),
        ];

        let change_set = ChangeSet::from_records(&records);
        let summary = change_set.summary();

        assert_eq!(summary.total_changes, 4);
        assert_eq!(summary.role_assignments, 1);
        assert_eq!(summary.custom_roles, 1);
        assert_eq!(summary.groups, 1);
        assert_eq!(summary.high_risk_changes, 0);
        let typed = summary.role_assignments + summary.custom_roles + summary.groups;
        assert!(typed < summary.total_changes);
    }

    #[test]
    fn total_matches_section_lengths() {
        let records = vec![
            record(GROUP_TYPE, "g.one", &["create"], Value::Null, json!({})),
            record(GROUP_TYPE, "g.two", &["delete", "create"], json!({}), json!({})),
            record(GROUP_TYPE, "g.three", &["update"], json!({}), json!({})),
            record(GROUP_TYPE, "g.four", &["delete"], json!({}), Value::Null),
            record(GROUP_TYPE, "g.five", &["read"], json!({}), json!({})),
        ];

        let change_set = ChangeSet::from_records(&records);
        let section_total: usize = ChangeAction::ORDERED
            .into_iter()
            .map(|action| change_set.changes(action).len())
            .sum();

        assert_eq!(change_set.summary().total_changes, section_total);
        assert_eq!(section_total, 4);
    }

    #[test]
    fn preserves_input_order_and_duplicate_addresses() {
        let records = vec![
            record(GROUP_TYPE, "g.b", &["create"], Value::Null, json!({})),
            record(GROUP_TYPE, "g.x", &["delete"], json!({}), Value::Null),
            record(GROUP_TYPE, "g.a", &["create"], Value::Null, json!({})),
            record(GROUP_TYPE, "g.b", &["create"], Value::Null, json!({})),
            record(GROUP_TYPE, "g.x", &["delete"], json!({}), Value::Null),
        ];

        let change_set = ChangeSet::from_records(&records);

        assert_eq!(
            addresses(change_set.changes(ChangeAction::Add)),
            vec!["g.b", "g.a", "g.b"]
        );
        assert_eq!(
            addresses(change_set.changes(ChangeAction::Remove)),
            vec!["g.x", "g.x"]
        );
        assert!(change_set.changes(ChangeAction::Modify).is_empty());
    }

    #[test]
    fn high_risk_counts_regardless_of_action() {
        let owner = json!({ "role_definition_id": OWNER_ROLE_ID });
        let records = vec![
            record(ROLE_ASSIGNMENT_TYPE, "ra.add", &["create"], Value::Null, owner.clone()),
            record(ROLE_ASSIGNMENT_TYPE, "ra.modify", &["update"], owner.clone(), owner.clone()),
            record(ROLE_ASSIGNMENT_TYPE, "ra.remove", &["delete"], json!({}), owner.clone()),
            record(ROLE_ASSIGNMENT_TYPE, "ra.gone", &["delete"], owner, Value::Null),
        ];

        let change_set = ChangeSet::from_records(&records);

        assert_eq!(change_set.summary().high_risk_changes, 3);
        assert!(change_set.has_high_risk());
    }

    #[test]
    fn sections_skip_empty_actions_in_fixed_order() {
        let records = vec![
            record(GROUP_TYPE, "g.removed", &["delete"], json!({}), Value::Null),
            record(GROUP_TYPE, "g.added", &["create"], Value::Null, json!({})),
        ];

        let change_set = ChangeSet::from_records(&records);
        let order: Vec<ChangeAction> = change_set.sections().map(|(action, _)| action).collect();

        assert_eq!(order, vec![ChangeAction::Add, ChangeAction::Remove]);
    }

    #[test]
    fn empty_plan_produces_empty_change_set() {
        let change_set = ChangeSet::from_plan(&PlanDocument::default());

        assert!(change_set.is_empty());
        assert_eq!(*change_set.summary(), Summary::default());
        assert_eq!(change_set.sections().count(), 0);
    }
}
