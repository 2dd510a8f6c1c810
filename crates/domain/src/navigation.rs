//! Role to route resolution tables.
//!
//! The resolver is a presentation filter for menu mounting. It does not
//! authorize anything on the server side.

use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::route::RouteName;

/// Policy applied to role tags that do not name a known role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Unrecognized roles see every route (fail-open).
    FullAccess,
    /// Unrecognized roles see no route (fail-closed).
    Deny,
}

impl FallbackPolicy {
    /// Returns a stable configuration value for this policy.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullAccess => "full_access",
            Self::Deny => "deny",
        }
    }

    /// Parses a configuration value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full_access" | "full" | "open" => Some(Self::FullAccess),
            "deny" | "closed" | "none" => Some(Self::Deny),
            _ => None,
        }
    }
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        FULL_ACCESS_FALLBACK
    }
}

/// Fallback used for unrecognized roles unless configured otherwise.
pub const FULL_ACCESS_FALLBACK: FallbackPolicy = FallbackPolicy::FullAccess;

const STAFF_ROUTES: &[RouteName] = &[
    RouteName::UserGroup,
    RouteName::CreateUserGroup,
    RouteName::UserGroupDetail,
    RouteName::PermTemplate,
    RouteName::PermTemplateCreate,
    RouteName::User,
    RouteName::PermTemplateDetail,
    RouteName::Administrator,
    RouteName::ApprovalProcess,
    RouteName::GroupPermRenewal,
    RouteName::Audit,
    RouteName::PermTemplateEdit,
    RouteName::PermTemplateDiff,
    RouteName::AddGroupPerm,
];

const SUPER_MANAGER_ROUTES: &[RouteName] = &[
    RouteName::ApplyCustomPerm,
    RouteName::ApplyJoinUserGroup,
    RouteName::Apply,
    RouteName::MyPerm,
    RouteName::TemplatePermDetail,
    RouteName::GroupPermDetail,
    RouteName::OrgPermDetail,
    RouteName::Approval,
    RouteName::PermRenewal,
    RouteName::SystemAccess,
    RouteName::SystemAccessCreate,
    RouteName::SystemAccessAccess,
    RouteName::SystemAccessRegistry,
    RouteName::SystemAccessOptimize,
    RouteName::SystemAccessComplete,
];

const SYSTEM_MANAGER_ROUTES: &[RouteName] = &[
    RouteName::ApplyCustomPerm,
    RouteName::ApplyJoinUserGroup,
    RouteName::Apply,
    RouteName::MyPerm,
    RouteName::TemplatePermDetail,
    RouteName::GroupPermDetail,
    RouteName::OrgPermDetail,
    RouteName::RatingManager,
    RouteName::GradingAdminCreate,
    RouteName::GradingAdminDetail,
    RouteName::User,
    RouteName::GradingAdminUpdateTemplate,
    RouteName::Approval,
    RouteName::PermRenewal,
    RouteName::SystemAccess,
    RouteName::SystemAccessCreate,
    RouteName::SystemAccessAccess,
    RouteName::SystemAccessRegistry,
    RouteName::SystemAccessOptimize,
    RouteName::SystemAccessComplete,
];

const RATING_MANAGER_ROUTES: &[RouteName] = &[
    RouteName::ApplyCustomPerm,
    RouteName::ApplyJoinUserGroup,
    RouteName::Apply,
    RouteName::MyPerm,
    RouteName::TemplatePermDetail,
    RouteName::GroupPermDetail,
    RouteName::OrgPermDetail,
    RouteName::RatingManager,
    RouteName::GradingAdminCreate,
    RouteName::GradingAdminDetail,
    RouteName::User,
    RouteName::GradingAdminUpdateTemplate,
    RouteName::Administrator,
    RouteName::Approval,
    RouteName::PermRenewal,
    RouteName::Audit,
    RouteName::SystemAccess,
    RouteName::SystemAccessCreate,
    RouteName::SystemAccessAccess,
    RouteName::SystemAccessRegistry,
    RouteName::SystemAccessOptimize,
    RouteName::SystemAccessComplete,
];

/// Returns the route table of a recognized role, `None` for unrecognized ones.
#[must_use]
pub fn routes_for_role(role: Role) -> Option<&'static [RouteName]> {
    match role {
        Role::Staff => Some(STAFF_ROUTES),
        Role::SuperManager => Some(SUPER_MANAGER_ROUTES),
        Role::SystemManager => Some(SYSTEM_MANAGER_ROUTES),
        Role::RatingManager => Some(RATING_MANAGER_ROUTES),
        Role::Unrecognized => None,
    }
}

/// Resolves a classified role under an explicit fallback policy.
#[must_use]
pub fn resolve_role(role: Role, fallback: FallbackPolicy) -> RouteSet {
    match routes_for_role(role) {
        Some(routes) => RouteSet::from_routes(routes.iter().copied()),
        None => match fallback {
            FallbackPolicy::FullAccess => RouteSet::full(),
            FallbackPolicy::Deny => RouteSet::empty(),
        },
    }
}

/// Resolves a raw role tag with the default fail-open fallback.
#[must_use]
pub fn resolve(role_tag: Option<&str>) -> RouteSet {
    resolve_role(Role::classify(role_tag), FULL_ACCESS_FALLBACK)
}

/// Ordered, duplicate-free set of visible routes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RouteSet(Vec<RouteName>);

impl RouteSet {
    /// Builds a set from routes, keeping the first occurrence of duplicates.
    pub fn from_routes(routes: impl IntoIterator<Item = RouteName>) -> Self {
        let mut ordered: Vec<RouteName> = Vec::new();
        for route in routes {
            if !ordered.contains(&route) {
                ordered.push(route);
            }
        }

        Self(ordered)
    }

    /// Returns the set of every known route.
    #[must_use]
    pub fn full() -> Self {
        Self(RouteName::all().to_vec())
    }

    /// Returns the empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns whether the route is visible.
    #[must_use]
    pub fn contains(&self, route: RouteName) -> bool {
        self.0.contains(&route)
    }

    /// Returns the number of visible routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no route is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether every route of this set is in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &RouteSet) -> bool {
        self.0.iter().all(|route| other.contains(*route))
    }

    /// Returns whether both sets hold the same routes, ignoring order.
    #[must_use]
    pub fn same_members(&self, other: &RouteSet) -> bool {
        self.len() == other.len() && self.is_subset_of(other)
    }

    /// Iterates the routes in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = RouteName> + '_ {
        self.0.iter().copied()
    }

    /// Returns the routes as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[RouteName] {
        self.0.as_slice()
    }
}

impl IntoIterator for RouteSet {
    type Item = RouteName;
    type IntoIter = std::vec::IntoIter<RouteName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{FallbackPolicy, RouteSet, resolve, resolve_role};
    use crate::role::Role;
    use crate::route::RouteName;

    #[test]
    fn empty_tag_resolves_like_staff() {
        assert_eq!(resolve(Some("")), resolve(Some("staff")));
    }

    #[test]
    fn unrecognized_tags_fail_open_to_every_route() {
        let full = RouteSet::full();
        assert_eq!(full.len(), 35);

        for tag in [None, Some("undefined"), Some("null"), Some("admin"), Some("STAFF")] {
            assert!(resolve(tag).same_members(&full), "tag {tag:?}");
        }
    }

    #[test]
    fn deny_fallback_hides_every_route() {
        assert!(resolve_role(Role::Unrecognized, FallbackPolicy::Deny).is_empty());
        assert!(!resolve_role(Role::Staff, FallbackPolicy::Deny).is_empty());
    }

    #[test]
    fn named_roles_are_proper_subsets_of_the_full_set() {
        let full = RouteSet::full();
        for role in Role::recognized() {
            let routes = resolve(Some(role.as_str()));
            assert!(!routes.is_empty());
            assert!(routes.is_subset_of(&full));
            assert!(routes.len() < full.len(), "{role:?}");
        }
    }

    #[test]
    fn system_manager_sees_grading_admin_but_not_settings() {
        let routes = resolve(Some("system_manager"));
        assert!(routes.contains(RouteName::GradingAdminCreate));
        assert!(routes.contains(RouteName::User));
        for route in [
            RouteName::SystemAccess,
            RouteName::SystemAccessCreate,
            RouteName::SystemAccessAccess,
            RouteName::SystemAccessRegistry,
            RouteName::SystemAccessOptimize,
            RouteName::SystemAccessComplete,
        ] {
            assert!(routes.contains(route), "{route}");
        }
        assert!(!routes.contains(RouteName::Administrator));
        assert!(!routes.contains(RouteName::Audit));
    }

    #[test]
    fn rating_manager_extends_system_manager_with_settings_and_audit() {
        let system_manager = resolve(Some("system_manager"));
        let rating_manager = resolve(Some("rating_manager"));
        assert!(system_manager.is_subset_of(&rating_manager));
        assert!(rating_manager.contains(RouteName::Administrator));
        assert!(rating_manager.contains(RouteName::Audit));
        assert_eq!(rating_manager.len(), system_manager.len() + 2);
    }

    #[test]
    fn super_manager_sees_self_service_without_administration() {
        let routes = resolve(Some("super_manager"));
        assert!(routes.contains(RouteName::ApplyCustomPerm));
        assert!(routes.contains(RouteName::SystemAccessComplete));
        assert!(!routes.contains(RouteName::UserGroup));
        assert!(!routes.contains(RouteName::GradingAdminCreate));
    }

    #[test]
    fn route_set_drops_duplicates_in_order() {
        let set = RouteSet::from_routes([RouteName::Audit, RouteName::User, RouteName::Audit]);
        assert_eq!(set.as_slice(), &[RouteName::Audit, RouteName::User]);
    }

    #[test]
    fn fallback_policy_parses_configuration_values() {
        assert_eq!(FallbackPolicy::parse("full_access"), Some(FallbackPolicy::FullAccess));
        assert_eq!(FallbackPolicy::parse(" DENY "), Some(FallbackPolicy::Deny));
        assert_eq!(FallbackPolicy::parse("maybe"), None);
        assert_eq!(FallbackPolicy::default(), FallbackPolicy::FullAccess);
    }

    proptest! {
        #[test]
        fn resolve_is_total_and_bounded(tag in ".*") {
            let routes = resolve(Some(tag.as_str()));
            prop_assert!(!routes.is_empty());
            prop_assert!(routes.is_subset_of(&RouteSet::full()));
        }

        #[test]
        fn unknown_tags_get_the_full_set(tag in "[a-z_]{1,24}") {
            prop_assume!(Role::classify(Some(tag.as_str())) == Role::Unrecognized);
            prop_assert!(resolve(Some(tag.as_str())).same_members(&RouteSet::full()));
        }
    }
}
