// src/domain/section.rs
use crate::domain::common::{ListWindow, SectionId, Slug};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    pub slug: Slug,
}

#[derive(Debug, Clone)]
pub struct NewSection {
    pub name: String,
    pub slug: Slug,
}

#[derive(Debug, Clone)]
pub struct SectionUpdate {
    pub id: SectionId,
    pub name: Option<String>,
    pub slug: Option<Slug>,
}

#[async_trait]
pub trait SectionRepository: Send + Sync {
    async fn insert(&self, section: NewSection) -> DomainResult<Section>;
    async fn update(&self, update: SectionUpdate) -> DomainResult<Section>;
    async fn delete(&self, id: SectionId) -> DomainResult<()>;
    async fn find_by_id(&self, id: SectionId) -> DomainResult<Option<Section>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Section>>;
    async fn list(&self, window: ListWindow) -> DomainResult<Vec<Section>>;
}
