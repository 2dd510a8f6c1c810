use serde::Serialize;

/// Namespaced label key resolved by the hosting UI's string catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TranslationKey {
    namespace: &'static str,
    key: &'static str,
}

impl TranslationKey {
    /// Creates a key in the given namespace.
    #[must_use]
    pub const fn new(namespace: &'static str, key: &'static str) -> Self {
        Self { namespace, key }
    }

    /// Returns the catalogue namespace.
    #[must_use]
    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Returns the key inside the namespace.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Resolves this key through a translator.
    #[must_use]
    pub fn translate(&self, translator: &dyn Translator) -> String {
        translator.translate(self.namespace, self.key)
    }
}

/// Placeholder shown for an aggregation group with no selected instances.
pub const PLEASE_SELECT: TranslationKey = TranslationKey::new("verify", "请选择");

/// Label lookup collaborator.
///
/// Implementations must be total: a missing entry resolves to some display
/// string rather than failing.
pub trait Translator: Send + Sync {
    /// Returns the display string for `key` in `namespace`.
    fn translate(&self, namespace: &str, key: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn translate(&self, namespace: &str, key: &str) -> String {
        self(namespace, key)
    }
}
