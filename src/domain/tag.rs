// src/domain/tag.rs
use crate::domain::common::{ListWindow, TagId, required_text};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

const MAX_TAG_NAME: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagName(String);

impl TagName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        required_text("tag name", value, MAX_TAG_NAME).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: TagName,
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Insert a tag unless one with the same name exists.
    /// Returns the stored tag and whether this call created it.
    async fn insert_if_absent(&self, name: TagName) -> DomainResult<(Tag, bool)>;
    async fn rename(&self, id: TagId, name: TagName) -> DomainResult<Tag>;
    async fn delete(&self, id: TagId) -> DomainResult<()>;
    async fn find_by_id(&self, id: TagId) -> DomainResult<Option<Tag>>;
    async fn find_by_name(&self, name: &TagName) -> DomainResult<Option<Tag>>;
    /// Tags whose name contains `search`, case-insensitively.
    async fn list(&self, search: Option<&str>, window: ListWindow) -> DomainResult<Vec<Tag>>;
}
