// src/domain/image.rs
use crate::domain::article::ArticleId;
use crate::domain::common::{AttachmentId, ImageId, ListWindow, PersonId};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Image {
    pub id: ImageId,
    pub title: Option<String>,
    pub filename: String,
    pub caption: Option<String>,
    pub authors: Vec<PersonId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewImage {
    pub title: Option<String>,
    pub filename: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ImageUpdate {
    pub id: ImageId,
    pub title: Option<Option<String>>,
    pub filename: Option<String>,
    pub caption: Option<Option<String>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageOrdering {
    CreatedAsc,
    #[default]
    CreatedDesc,
}

impl ImageOrdering {
    /// Parses the `ordering` query value (`created_at` / `-created_at`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "created_at" => Some(Self::CreatedAsc),
            "-created_at" => Some(Self::CreatedDesc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageFilter {
    /// Matched case-insensitively against title and filename.
    pub search: Option<String>,
    pub ordering: ImageOrdering,
    pub window: ListWindow,
}

#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn insert(&self, image: NewImage) -> DomainResult<Image>;
    async fn update(&self, update: ImageUpdate) -> DomainResult<Image>;
    /// Replace the ordered author list of an image.
    async fn save_authors(&self, id: ImageId, authors: &[PersonId]) -> DomainResult<()>;
    async fn delete(&self, id: ImageId) -> DomainResult<()>;
    async fn find_by_id(&self, id: ImageId) -> DomainResult<Option<Image>>;
    async fn list(&self, filter: &ImageFilter) -> DomainResult<Vec<Image>>;
}

/// An image placed inside an article.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub id: AttachmentId,
    pub article_id: ArticleId,
    pub image: Image,
    pub caption: Option<String>,
    pub credit: Option<String>,
    pub position: i32,
}

#[derive(Debug, Clone)]
pub struct NewImageAttachment {
    pub article_id: ArticleId,
    pub image_id: ImageId,
    pub caption: Option<String>,
    pub credit: Option<String>,
}

#[async_trait]
pub trait ImageAttachmentRepository: Send + Sync {
    /// Appends after the article's current last attachment.
    async fn insert(&self, attachment: NewImageAttachment) -> DomainResult<ImageAttachment>;
    async fn list(
        &self,
        article: Option<ArticleId>,
        window: ListWindow,
    ) -> DomainResult<Vec<ImageAttachment>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_parses_drf_style_values() {
        assert_eq!(ImageOrdering::parse("created_at"), Some(ImageOrdering::CreatedAsc));
        assert_eq!(ImageOrdering::parse("-created_at"), Some(ImageOrdering::CreatedDesc));
        assert_eq!(ImageOrdering::parse("title"), None);
        assert_eq!(ImageOrdering::default(), ImageOrdering::CreatedDesc);
    }
}
