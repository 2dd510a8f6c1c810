use iamview_core::UserIdentity;
use iamview_domain::{FallbackPolicy, Role, RouteName, RouteSet, resolve_role};
use tracing::{debug, warn};

/// Navigation visible to one role tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationResolution {
    /// Classification of the tag.
    pub role: Role,
    /// Whether the fallback policy produced the routes.
    pub used_fallback: bool,
    /// Routes the menu may mount.
    pub routes: RouteSet,
}

/// Application service deciding which menu entries a role may see.
///
/// This is a presentation filter. Server endpoints authorize on their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationService {
    fallback: FallbackPolicy,
}

impl NavigationService {
    /// Creates a navigation service with an explicit fallback policy.
    #[must_use]
    pub fn new(fallback: FallbackPolicy) -> Self {
        Self { fallback }
    }

    /// Returns the policy applied to unrecognized roles.
    #[must_use]
    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Resolves the visible routes for a raw role tag.
    pub fn resolve(&self, role_tag: Option<&str>) -> NavigationResolution {
        let role = Role::classify(role_tag);
        let used_fallback = !role.is_recognized();
        let routes = resolve_role(role, self.fallback);

        if used_fallback {
            warn!(
                role_tag = ?role_tag,
                fallback = self.fallback.as_str(),
                route_count = routes.len(),
                "unrecognized role tag resolved through fallback policy"
            );
        } else {
            debug!(
                role = role.as_str(),
                route_count = routes.len(),
                "resolved navigation"
            );
        }

        NavigationResolution {
            role,
            used_fallback,
            routes,
        }
    }

    /// Resolves the visible routes for a signed-in identity.
    pub fn resolve_for(&self, identity: &UserIdentity) -> NavigationResolution {
        self.resolve(identity.role())
    }

    /// Returns whether a single route is visible for a role tag.
    pub fn is_route_visible(&self, role_tag: Option<&str>, route: RouteName) -> bool {
        self.resolve(role_tag).routes.contains(route)
    }
}
