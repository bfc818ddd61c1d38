// src/domain/common.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

macro_rules! entity_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> DomainResult<Self> {
                if id <= 0 {
                    Err(DomainError::Validation(concat!($label, " id must be positive").into()))
                } else {
                    Ok(Self(id))
                }
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(SectionId, "section");
entity_id!(TagId, "tag");
entity_id!(PersonId, "person");
entity_id!(ImageId, "image");
entity_id!(AttachmentId, "attachment");

/// URL-safe identifier for sections and people.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let value = value.trim();
        if value.is_empty() {
            return Err(DomainError::Validation("slug cannot be empty".into()));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::Validation(
                "slug may only contain lowercase letters, digits and '-'".into(),
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty text bounded by `max` characters.
pub fn required_text(field: &str, value: impl Into<String>, max: usize) -> DomainResult<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{field} cannot be empty")));
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Offset window over an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    pub limit: u32,
    pub offset: u32,
}

impl ListWindow {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// Same window asking for one extra row, used to detect a following page.
    pub fn probe(self) -> Self {
        Self {
            limit: self.limit.saturating_add(1),
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert!(TagId::new(0).is_err());
        assert_eq!(i64::from(TagId::new(7).unwrap()), 7);
    }

    #[test]
    fn slug_rejects_uppercase_and_spaces() {
        assert!(Slug::new("news").is_ok());
        assert!(Slug::new("News").is_err());
        assert!(Slug::new("breaking news").is_err());
        assert!(Slug::new("").is_err());
    }

    #[test]
    fn required_text_trims_and_bounds() {
        assert_eq!(required_text("name", "  Sports ", 10).unwrap(), "Sports");
        assert!(required_text("name", "   ", 10).is_err());
        assert!(required_text("name", "abcdef", 5).is_err());
    }
}
