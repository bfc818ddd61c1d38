use crate::domain::article::entity::{Article, ArticleFilter, ArticleUpdate, NewArticle};
use crate::domain::article::revision::ArticleRevision;
use crate::domain::article::value_objects::{ArticleId, ArticleSlug};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    /// Fails with `Conflict` when the stored revision no longer matches `original_revision`.
    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article>;
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>>;
    /// Newest first by `published_at` (unpublished last), then by id.
    async fn list(&self, filter: &ArticleFilter) -> DomainResult<Vec<Article>>;
}

#[async_trait]
pub trait ArticleRevisionRepository: Send + Sync {
    async fn append(&self, revision: ArticleRevision) -> DomainResult<()>;
    async fn find(
        &self,
        article_id: ArticleId,
        revision_id: i32,
    ) -> DomainResult<Option<ArticleRevision>>;
    async fn list_by_article(&self, article_id: ArticleId) -> DomainResult<Vec<ArticleRevision>>;
}
