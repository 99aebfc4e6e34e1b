//! The profile record.

use serde::{Deserialize, Serialize};

/// A stored profile.
///
/// `id` is assigned by the storage layer on create; any value a caller
/// supplies is overwritten. Unknown JSON fields are rejected so that a body
/// such as `{"invalid": "field"}` fails to decode instead of silently
/// producing an empty record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    /// Decimal form of the collection sequence value minted at creation.
    pub id: String,

    /// Display name. Omitted from JSON when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl Profile {
    /// Create a profile with the given name and no id.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
        }
    }

    /// Whether every field holds its default value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
