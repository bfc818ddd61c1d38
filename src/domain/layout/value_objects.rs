use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_SLUG_LEN: usize = 100;

fn validate_slug(kind: &str, value: String) -> DomainResult<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{kind} cannot be empty")));
    }
    if value.len() > MAX_SLUG_LEN {
        return Err(DomainError::Validation(format!(
            "{kind} must be at most {MAX_SLUG_LEN} characters"
        )));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(DomainError::Validation(format!(
            "{kind} may only contain letters, digits, '-' and '_'"
        )));
    }
    Ok(value)
}

macro_rules! slug_type {
    ($name:ident, $kind:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> DomainResult<Self> {
                validate_slug($kind, value.into()).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

slug_type!(PageSlug, "page slug");
slug_type!(SpotId, "spot");
slug_type!(ComponentSlug, "component slug");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub i64);

impl From<PageId> for i64 {
    fn from(value: PageId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementId(pub i64);

impl From<PlacementId> for i64 {
    fn from(value: PlacementId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_trimmed() {
        let slug = PageSlug::new("  home ").unwrap();
        assert_eq!(slug.as_str(), "home");
    }

    #[test]
    fn slug_rejects_empty_and_unsafe_values() {
        assert!(SpotId::new("   ").is_err());
        assert!(SpotId::new("side bar").is_err());
        assert!(ComponentSlug::new("a/b").is_err());
        assert!(ComponentSlug::new("featured_article-2").is_ok());
    }

    #[test]
    fn slug_deserializes_through_validation() {
        let ok: SpotId = serde_json::from_str("\"hero\"").unwrap();
        assert_eq!(ok.as_str(), "hero");
        assert!(serde_json::from_str::<SpotId>("\"no spaces\"").is_err());
    }
}
