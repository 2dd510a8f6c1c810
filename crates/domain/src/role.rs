use serde::{Deserialize, Serialize};

/// Coarse identity classification that drives menu visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Ordinary staff member. The empty tag is an alias of this role.
    Staff,
    /// Console-wide super administrator.
    SuperManager,
    /// Administrator of one or more access systems.
    SystemManager,
    /// Grading (tiered) administrator.
    RatingManager,
    /// Any other tag, including an unset one.
    Unrecognized,
}

impl Role {
    /// Classifies a raw role tag. Total over every input.
    #[must_use]
    pub fn classify(tag: Option<&str>) -> Self {
        match tag {
            Some("staff") | Some("") => Self::Staff,
            Some("super_manager") => Self::SuperManager,
            Some("system_manager") => Self::SystemManager,
            Some("rating_manager") => Self::RatingManager,
            _ => Self::Unrecognized,
        }
    }

    /// Returns a stable transport value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::SuperManager => "super_manager",
            Self::SystemManager => "system_manager",
            Self::RatingManager => "rating_manager",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Returns every explicitly recognized role.
    #[must_use]
    pub fn recognized() -> &'static [Self] {
        const RECOGNIZED: &[Role] = &[
            Role::Staff,
            Role::SuperManager,
            Role::SystemManager,
            Role::RatingManager,
        ];

        RECOGNIZED
    }

    /// Returns whether the tag mapped onto one of the named roles.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}
