//! Navigation destinations of the console and their static metadata.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use iamview_core::AppError;
use serde::{Deserialize, Serialize};

use crate::translation::TranslationKey;

/// One navigable destination of the console, identified by its route token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteName {
    /// System access landing page.
    SystemAccess,
    /// Start a new system access.
    SystemAccessCreate,
    /// Continue an existing system access.
    SystemAccessAccess,
    /// Register models of an accessed system.
    SystemAccessRegistry,
    /// Tune the registered models.
    SystemAccessOptimize,
    /// Access completed.
    SystemAccessComplete,
    /// My permissions.
    MyPerm,
    /// Detail of a permission obtained through a template.
    TemplatePermDetail,
    /// Detail of a permission obtained through a user group.
    GroupPermDetail,
    /// Detail of a permission obtained through the organization.
    OrgPermDetail,
    /// User group list.
    UserGroup,
    /// Create a user group.
    CreateUserGroup,
    /// User group detail.
    UserGroupDetail,
    /// Permission detail of one template inside a user group.
    UserGroupPermDetail,
    /// Permission template list.
    PermTemplate,
    /// Permission template detail.
    PermTemplateDetail,
    /// Create a permission template.
    PermTemplateCreate,
    /// Apply for a custom permission.
    ApplyCustomPerm,
    /// Apply to join a user group.
    ApplyJoinUserGroup,
    /// My applications.
    Apply,
    /// User list.
    User,
    /// Grading administrator list.
    RatingManager,
    /// Create a grading administrator.
    GradingAdminCreate,
    /// Grading administrator detail.
    GradingAdminDetail,
    /// Edit a grading administrator.
    GradingAdminEdit,
    /// Update the templates of a grading administrator.
    GradingAdminUpdateTemplate,
    /// Administrator settings.
    Administrator,
    /// Approval process configuration.
    ApprovalProcess,
    /// My approvals.
    Approval,
    /// Renew my permissions.
    PermRenewal,
    /// Renew user group memberships.
    GroupPermRenewal,
    /// Audit log.
    Audit,
    /// Edit a permission template.
    PermTemplateEdit,
    /// Review the difference of a template edit before syncing.
    PermTemplateDiff,
    /// Add permissions to a user group.
    AddGroupPerm,
}

/// Menu area a route is mounted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteArea {
    /// System access onboarding flow.
    SystemAccess,
    /// Applications and personal permissions.
    SelfService,
    /// User group management.
    UserGroup,
    /// Permission template management.
    PermTemplate,
    /// User and grading administrator management.
    Management,
    /// Settings, approval process and audit.
    Administration,
}

impl RouteArea {
    /// Returns a stable transport value for this area.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SystemAccess => "system_access",
            Self::SelfService => "self_service",
            Self::UserGroup => "user_group",
            Self::PermTemplate => "perm_template",
            Self::Management => "management",
            Self::Administration => "administration",
        }
    }
}

/// Target of the page header's back button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackTarget {
    /// Navigate to a named route.
    Route(RouteName),
    /// Step back in browser history.
    History,
}

/// Static metadata attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMeta {
    path: &'static str,
    area: RouteArea,
    back: Option<BackTarget>,
    header_title: Option<TranslationKey>,
}

impl RouteMeta {
    const fn new(path: &'static str, area: RouteArea) -> Self {
        Self {
            path,
            area,
            back: None,
            header_title: None,
        }
    }

    const fn titled(mut self, namespace: &'static str, key: &'static str) -> Self {
        self.header_title = Some(TranslationKey::new(namespace, key));
        self
    }

    const fn back_to(mut self, route: RouteName) -> Self {
        self.back = Some(BackTarget::Route(route));
        self
    }

    const fn back_in_history(mut self) -> Self {
        self.back = Some(BackTarget::History);
        self
    }

    /// Path template relative to the site root; `:name` segments are parameters.
    #[must_use]
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Menu area of the route.
    #[must_use]
    pub fn area(&self) -> RouteArea {
        self.area
    }

    /// Back button target, if the page header shows one.
    #[must_use]
    pub fn back(&self) -> Option<BackTarget> {
        self.back
    }

    /// Header title key; `None` when the page sets its own title.
    #[must_use]
    pub fn header_title(&self) -> Option<TranslationKey> {
        self.header_title
    }
}

impl RouteName {
    /// Returns the route token.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SystemAccess => "systemAccess",
            Self::SystemAccessCreate => "systemAccessCreate",
            Self::SystemAccessAccess => "systemAccessAccess",
            Self::SystemAccessRegistry => "systemAccessRegistry",
            Self::SystemAccessOptimize => "systemAccessOptimize",
            Self::SystemAccessComplete => "systemAccessComplete",
            Self::MyPerm => "myPerm",
            Self::TemplatePermDetail => "templatePermDetail",
            Self::GroupPermDetail => "groupPermDetail",
            Self::OrgPermDetail => "orgPermDetail",
            Self::UserGroup => "userGroup",
            Self::CreateUserGroup => "createUserGroup",
            Self::UserGroupDetail => "userGroupDetail",
            Self::UserGroupPermDetail => "userGroupPermDetail",
            Self::PermTemplate => "permTemplate",
            Self::PermTemplateDetail => "permTemplateDetail",
            Self::PermTemplateCreate => "permTemplateCreate",
            Self::ApplyCustomPerm => "applyCustomPerm",
            Self::ApplyJoinUserGroup => "applyJoinUserGroup",
            Self::Apply => "apply",
            Self::User => "user",
            Self::RatingManager => "ratingManager",
            Self::GradingAdminCreate => "gradingAdminCreate",
            Self::GradingAdminDetail => "gradingAdminDetail",
            Self::GradingAdminEdit => "gradingAdminEdit",
            Self::GradingAdminUpdateTemplate => "gradingAdminUpdateTemplate",
            Self::Administrator => "administrator",
            Self::ApprovalProcess => "approvalProcess",
            Self::Approval => "approval",
            Self::PermRenewal => "permRenewal",
            Self::GroupPermRenewal => "groupPermRenewal",
            Self::Audit => "audit",
            Self::PermTemplateEdit => "permTemplateEdit",
            Self::PermTemplateDiff => "permTemplateDiff",
            Self::AddGroupPerm => "addGroupPerm",
        }
    }

    /// Returns every known route in menu declaration order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[RouteName] = &[
            RouteName::SystemAccess,
            RouteName::SystemAccessCreate,
            RouteName::SystemAccessAccess,
            RouteName::SystemAccessRegistry,
            RouteName::SystemAccessOptimize,
            RouteName::SystemAccessComplete,
            RouteName::MyPerm,
            RouteName::TemplatePermDetail,
            RouteName::GroupPermDetail,
            RouteName::OrgPermDetail,
            RouteName::UserGroup,
            RouteName::CreateUserGroup,
            RouteName::UserGroupDetail,
            RouteName::UserGroupPermDetail,
            RouteName::PermTemplate,
            RouteName::PermTemplateDetail,
            RouteName::PermTemplateCreate,
            RouteName::ApplyCustomPerm,
            RouteName::ApplyJoinUserGroup,
            RouteName::Apply,
            RouteName::User,
            RouteName::RatingManager,
            RouteName::GradingAdminCreate,
            RouteName::GradingAdminDetail,
            RouteName::GradingAdminEdit,
            RouteName::GradingAdminUpdateTemplate,
            RouteName::Administrator,
            RouteName::ApprovalProcess,
            RouteName::Approval,
            RouteName::PermRenewal,
            RouteName::GroupPermRenewal,
            RouteName::Audit,
            RouteName::PermTemplateEdit,
            RouteName::PermTemplateDiff,
            RouteName::AddGroupPerm,
        ];

        ALL
    }

    /// Returns the static metadata of this route.
    #[must_use]
    pub fn meta(&self) -> RouteMeta {
        use RouteArea::{
            Administration, Management, PermTemplate, SelfService, SystemAccess, UserGroup,
        };

        match self {
            Self::SystemAccess => RouteMeta::new("system-access", SystemAccess).titled("nav", "系统接入"),
            Self::SystemAccessCreate => RouteMeta::new("system-access/access", SystemAccess)
                .titled("nav", "系统接入")
                .back_to(Self::SystemAccess),
            Self::SystemAccessAccess => RouteMeta::new("system-access/access/:id", SystemAccess)
                .titled("nav", "系统接入")
                .back_to(Self::SystemAccess),
            Self::SystemAccessRegistry => RouteMeta::new("system-access/registry/:id", SystemAccess)
                .titled("nav", "系统接入")
                .back_to(Self::SystemAccessAccess),
            Self::SystemAccessOptimize => RouteMeta::new("system-access/optimize/:id", SystemAccess)
                .titled("nav", "系统接入")
                .back_to(Self::SystemAccessRegistry),
            Self::SystemAccessComplete => RouteMeta::new("system-access/complete/:id", SystemAccess)
                .titled("nav", "系统接入")
                .back_to(Self::SystemAccessRegistry),
            Self::MyPerm => RouteMeta::new("my-perm", SelfService).titled("nav", "我的权限"),
            Self::TemplatePermDetail => RouteMeta::new("my-perm/template-perm/:id", SelfService),
            Self::GroupPermDetail => RouteMeta::new("my-perm/group-perm/:id", SelfService),
            Self::OrgPermDetail => RouteMeta::new("my-perm/organization-perm/:id", SelfService),
            Self::UserGroup => RouteMeta::new("user-group", UserGroup).titled("nav", "用户组"),
            Self::CreateUserGroup => RouteMeta::new("create-user-group", UserGroup)
                .titled("userGroup", "新建用户组")
                .back_to(Self::UserGroup),
            Self::UserGroupDetail => {
                RouteMeta::new("user-group-detail/:id", UserGroup).back_to(Self::UserGroup)
            }
            Self::UserGroupPermDetail => {
                RouteMeta::new("user-group-perm-detail/:id/:templateId", UserGroup)
                    .back_in_history()
            }
            Self::PermTemplate => {
                RouteMeta::new("perm-template", PermTemplate).titled("nav", "权限模板")
            }
            Self::PermTemplateDetail => {
                RouteMeta::new("perm-template-detail/:id/:systemId", PermTemplate)
                    .back_to(Self::PermTemplate)
            }
            Self::PermTemplateCreate => RouteMeta::new("perm-template-create", PermTemplate)
                .titled("nav", "新建权限模板")
                .back_to(Self::PermTemplate),
            Self::ApplyCustomPerm => RouteMeta::new("apply-custom-perm", SelfService)
                .titled("applyEntrance", "申请自定义权限")
                .back_in_history(),
            Self::ApplyJoinUserGroup => RouteMeta::new("apply-join-user-group", SelfService)
                .titled("applyEntrance", "申请加入用户组"),
            Self::Apply => RouteMeta::new("apply", SelfService).titled("nav", "我的申请"),
            Self::User => RouteMeta::new("user", Management).titled("nav", "用户"),
            Self::RatingManager => {
                RouteMeta::new("rating-manager", Management).titled("grading", "分级管理员")
            }
            Self::GradingAdminCreate => RouteMeta::new(":id/rating-manager-create", Management)
                .titled("nav", "新建分级管理员")
                .back_to(Self::RatingManager),
            Self::GradingAdminDetail => {
                RouteMeta::new(":id/rating-manager-detail", Management).back_to(Self::RatingManager)
            }
            Self::GradingAdminEdit => RouteMeta::new(":id/rating-manager-edit", Management)
                .back_to(Self::GradingAdminDetail),
            Self::GradingAdminUpdateTemplate => {
                RouteMeta::new(":id/rating-manager-update-template", Management)
                    .titled("nav", "编辑分级管理员")
                    .back_to(Self::GradingAdminEdit)
            }
            Self::Administrator => {
                RouteMeta::new("administrator", Administration).titled("common", "管理员")
            }
            Self::ApprovalProcess => {
                RouteMeta::new("approval-process", Administration).titled("myApply", "审批流程")
            }
            Self::Approval => RouteMeta::new("approval", SelfService),
            Self::PermRenewal => RouteMeta::new("perm-renewal", SelfService)
                .titled("renewal", "批量续期")
                .back_to(Self::MyPerm),
            Self::GroupPermRenewal => RouteMeta::new("group-perm-renewal", Administration)
                .titled("renewal", "用户组成员续期")
                .back_to(Self::MyPerm),
            Self::Audit => RouteMeta::new("audit", Administration).titled("nav", "审计"),
            Self::PermTemplateEdit => {
                RouteMeta::new("perm-template-edit/:id/:systemId", PermTemplate)
                    .back_to(Self::PermTemplateDetail)
            }
            Self::PermTemplateDiff => {
                RouteMeta::new("perm-template-diff/:id/:systemId", PermTemplate).back_in_history()
            }
            Self::AddGroupPerm => RouteMeta::new("add-group-perm/:id", UserGroup)
                .titled("userGroup", "添加组权限")
                .back_in_history(),
        }
    }

    /// Parses a transport value into a route.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for RouteName {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|route| route.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown route name '{value}'")))
    }
}

impl Display for RouteName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}
