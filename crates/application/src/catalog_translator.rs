use std::collections::HashMap;

use iamview_core::{AppError, AppResult};
use iamview_domain::Translator;
use serde_json::Value;

/// In-memory string catalogue keyed by namespace and source text.
///
/// Missing entries resolve to the key itself, which is the source-language
/// text in the console's catalogues.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    entries: HashMap<String, HashMap<String, String>>,
}

impl CatalogTranslator {
    /// Creates an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one entry.
    pub fn insert(
        &mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.entries
            .entry(namespace.into())
            .or_default()
            .insert(key.into(), text.into());
    }

    /// Merges a `{namespace: {key: text}}` JSON document and returns the
    /// number of entries read. Nothing is merged unless the whole document
    /// is well formed.
    pub fn merge_json(&mut self, document: &str) -> AppResult<usize> {
        let value: Value = serde_json::from_str(document).map_err(|error| {
            AppError::Validation(format!("invalid translation catalogue: {error}"))
        })?;
        let Value::Object(namespaces) = value else {
            return Err(AppError::Validation(
                "translation catalogue must be a JSON object".to_owned(),
            ));
        };

        let mut staged = Vec::new();
        for (namespace, keys) in namespaces {
            let Value::Object(keys) = keys else {
                return Err(AppError::Validation(format!(
                    "translation namespace '{namespace}' must be an object"
                )));
            };

            for (key, text) in keys {
                let Value::String(text) = text else {
                    return Err(AppError::Validation(format!(
                        "translation '{namespace}.{key}' must be a string"
                    )));
                };
                staged.push((namespace.clone(), key, text));
            }
        }

        let merged = staged.len();
        for (namespace, key, text) in staged {
            self.insert(namespace, key, text);
        }

        Ok(merged)
    }

    /// Returns the number of entries across namespaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// Returns whether the catalogue holds no entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, namespace: &str, key: &str) -> String {
        self.entries
            .get(namespace)
            .and_then(|keys| keys.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_owned())
    }
}
