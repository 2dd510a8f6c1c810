//! Domain model of the console's access-presentation layer.

#![forbid(unsafe_code)]

mod aggregation;
mod grant;
mod navigation;
mod role;
mod route;
mod translation;

pub use aggregation::{AggregationPolicy, AggregationPolicyPayload};
pub use grant::{
    AggregateResourceType, CUSTOM_PERM_TEMPLATE_ID, Grant, GrantDetail, ResourceInstance,
    SystemRef,
};
pub use navigation::{
    FULL_ACCESS_FALLBACK, FallbackPolicy, RouteSet, resolve, resolve_role, routes_for_role,
};
pub use role::Role;
pub use route::{BackTarget, RouteArea, RouteMeta, RouteName};
pub use translation::{PLEASE_SELECT, TranslationKey, Translator};
