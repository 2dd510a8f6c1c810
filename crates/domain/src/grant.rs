//! Backend grant payloads consumed by the aggregation model.

use iamview_core::NonEmptyString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Definition id that marks a grant as a free-form custom permission.
pub const CUSTOM_PERM_TEMPLATE_ID: i64 = 0;

/// Access system owning a grant's action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRef {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
}

impl SystemRef {
    /// Creates a system reference.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Returns the system id.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the system display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Permission definition a grant was issued under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantDetail {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    system: SystemRef,
}

impl GrantDetail {
    /// Creates a definition detail.
    #[must_use]
    pub fn new(id: i64, system: SystemRef) -> Self {
        Self { id, system }
    }

    /// Returns the template id, or [`CUSTOM_PERM_TEMPLATE_ID`] for custom grants.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the owning system.
    #[must_use]
    pub fn system(&self) -> &SystemRef {
        &self.system
    }

    /// Returns whether the definition is a permission template.
    #[must_use]
    pub fn is_template(&self) -> bool {
        self.id != CUSTOM_PERM_TEMPLATE_ID
    }
}

/// One action grant as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    #[serde(alias = "actionId")]
    id: NonEmptyString,
    #[serde(default, alias = "actionName")]
    name: String,
    #[serde(default)]
    detail: GrantDetail,
}

impl Grant {
    /// Creates a grant for an action.
    #[must_use]
    pub fn new(id: NonEmptyString, name: impl Into<String>, detail: GrantDetail) -> Self {
        Self {
            id,
            name: name.into(),
            detail,
        }
    }

    /// Returns the action id.
    #[must_use]
    pub fn id(&self) -> &NonEmptyString {
        &self.id
    }

    /// Returns the action display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the definition the grant was issued under.
    #[must_use]
    pub fn detail(&self) -> &GrantDetail {
        &self.detail
    }
}

/// One concrete resource selected for a grant.
///
/// Only `id` and `name` are interpreted; every other field is carried as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceInstance {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ResourceInstance {
    /// Creates an instance with no extra fields.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Attaches uninterpreted fields. `id` and `name` keys are ignored.
    #[must_use]
    pub fn with_extra(mut self, mut extra: Map<String, Value>) -> Self {
        extra.remove("id");
        extra.remove("name");
        self.extra = extra;
        self
    }

    /// Returns the instance id.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the uninterpreted fields.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Renames the instance in place.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// Descriptor of the resource type an aggregation group selects instances of.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResourceType {
    #[serde(default)]
    id: String,
    #[serde(default)]
    system_id: String,
    #[serde(default)]
    name: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl AggregateResourceType {
    /// Creates a resource type descriptor.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        system_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            system_id: system_id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Returns the resource type id.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the system the resource type belongs to.
    #[must_use]
    pub fn system_id(&self) -> &str {
        self.system_id.as_str()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns whether both descriptors name the same resource type.
    #[must_use]
    pub fn same_type(&self, other: &AggregateResourceType) -> bool {
        self.id == other.id && self.system_id == other.system_id
    }
}
