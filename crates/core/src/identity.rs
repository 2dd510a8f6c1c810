use serde::{Deserialize, Serialize};

/// Signed-in user as seen by the console shell.
///
/// `role` is the raw identity classification tag delivered with the session.
/// It is kept unparsed so that unset and unknown values survive until the
/// navigation layer classifies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    display_name: String,
    role: Option<String>,
}

impl UserIdentity {
    /// Creates a user identity from session data.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        role: Option<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            role,
        }
    }

    /// Returns the stable subject (username) of the user.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the raw role tag, if the session carried one.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }
}
