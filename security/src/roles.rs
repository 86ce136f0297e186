// security/src/roles.rs
use serde::Deserialize;

/// Portal roles. District Admins and Field Workers only see patients in
/// their own district; the other roles see everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Role {
    SuperAdmin,
    DistrictAdmin,
    FieldWorker,
    PhcStaff,
}

impl Role {
    /// Accepts both the display form stored in the user directory
    /// ("District Admin") and the enum form the SPA sends in query strings
    /// ("DISTRICT_ADMIN").
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "Super Admin" | "SUPER_ADMIN" => Some(Role::SuperAdmin),
            "District Admin" | "DISTRICT_ADMIN" => Some(Role::DistrictAdmin),
            "Field Worker" | "FIELD_WORKER" => Some(Role::FieldWorker),
            "PHC Staff" | "PHC_STAFF" => Some(Role::PhcStaff),
            _ => None,
        }
    }

    pub fn is_location_scoped(&self) -> bool {
        matches!(self, Role::DistrictAdmin | Role::FieldWorker)
    }
}

/// The district a query must be pinned to for a given role/location pair,
/// if any. "All" is the unrestricted sentinel carried by admin users.
pub fn location_scope(role: Option<Role>, user_location: Option<&str>) -> Option<String> {
    let role = role?;
    let loc = user_location?;
    if role.is_location_scoped() && loc != "All" {
        Some(loc.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_role_spellings() {
        assert_eq!(Role::parse("District Admin"), Some(Role::DistrictAdmin));
        assert_eq!(Role::parse("DISTRICT_ADMIN"), Some(Role::DistrictAdmin));
        assert_eq!(Role::parse("FIELD_WORKER"), Some(Role::FieldWorker));
        assert_eq!(Role::parse("clerk"), None);
    }

    #[test]
    fn scoped_roles_pin_their_district() {
        assert_eq!(
            location_scope(Some(Role::DistrictAdmin), Some("Wayanad")),
            Some("Wayanad".to_string())
        );
        assert_eq!(
            location_scope(Some(Role::FieldWorker), Some("Wayanad")),
            Some("Wayanad".to_string())
        );
    }

    #[test]
    fn unscoped_roles_and_all_sentinel_see_everything() {
        assert_eq!(location_scope(Some(Role::SuperAdmin), Some("Wayanad")), None);
        assert_eq!(location_scope(Some(Role::DistrictAdmin), Some("All")), None);
        assert_eq!(location_scope(None, Some("Wayanad")), None);
        assert_eq!(location_scope(Some(Role::FieldWorker), None), None);
    }
}
