pub const OWNER_ROLE_ID: &str = "8e3af657-a8ff-443c-a75c-2fe8c4bcb635";
pub const CONTRIBUTOR_ROLE_ID: &str = "b24988ac-6180-42a0-ab88-20f7382dd24c";
pub const READER_ROLE_ID: &str = "acdd72a7-3385-48ef-bd42-f606fba81ae7";
pub const USER_ACCESS_ADMINISTRATOR_ROLE_ID: &str = "18d7d88d-d35e-4fb5-a5c3-7773c20a72d9";

/// Built-in role definition ids and their display names, in lookup order.
pub const WELL_KNOWN_ROLES: [(&str, &str); 4] = [
    (OWNER_ROLE_ID, "Owner"),
    (CONTRIBUTOR_ROLE_ID, "Contributor"),
    (READER_ROLE_ID, "Reader"),
    (USER_ACCESS_ADMINISTRATOR_ROLE_ID, "User Access Administrator"),
];

pub fn well_known_role_name(role_id: &str) -> Option<&'static str> {
    WELL_KNOWN_ROLES
        .iter()
        .find(|(id, _)| *id == role_id)
        .map(|(_, name)| *name)
}

pub fn find_embedded_role_name(value: &str) -> Option<&'static str> {
    WELL_KNOWN_ROLES
        .iter()
        .find(|(id, _)| value.contains(id))
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_lookup_requires_full_id() {
        assert_eq!(well_known_role_name(READER_ROLE_ID), Some("Reader"));
        assert_eq!(well_known_role_name("acdd72a7"), None);
    }

    #[test]
    fn embedded_lookup_matches_ids_inside_paths() {
        let path = format!(
            "/subscriptions/0000/providers/Microsoft.Authorization/roleDefinitions/{CONTRIBUTOR_ROLE_ID}"
        );
        assert_eq!(find_embedded_role_name(&path), Some("Contributor"));
        assert_eq!(find_embedded_role_name("Contributor"), None);
    }
}
