use crate::domain::article::{Article, ArticleRevision};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::tags::TagDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub id: i64,
    pub revision_id: i32,
    pub long_headline: String,
    pub short_headline: Option<String>,
    pub slug: String,
    pub snippet: Option<String>,
    pub content: String,
    pub section_id: i64,
    pub authors: Vec<i64>,
    pub tags: Vec<TagDto>,
    pub topics: Vec<String>,
    pub importance: u8,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            revision_id: article.revision_id,
            long_headline: article.headline.into_inner(),
            short_headline: article.short_headline,
            slug: article.slug.into_inner(),
            snippet: article.snippet,
            content: article.content,
            section_id: article.section_id.into(),
            authors: article.author_ids.into_iter().map(i64::from).collect(),
            tags: article.tags.into_iter().map(TagDto::from).collect(),
            topics: article.topics,
            importance: article.importance.value(),
            is_published: article.published,
            published_at: article.published_at,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleRevisionDto {
    pub article_id: i64,
    pub revision_id: i32,
    pub long_headline: String,
    pub short_headline: Option<String>,
    pub slug: String,
    pub snippet: Option<String>,
    pub content: String,
    pub section_id: i64,
    pub authors: Vec<i64>,
    pub tags: Vec<String>,
    pub topics: Vec<String>,
    pub importance: i16,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub recorded_at: DateTime<Utc>,
}

impl From<ArticleRevision> for ArticleRevisionDto {
    fn from(revision: ArticleRevision) -> Self {
        Self {
            article_id: revision.article_id.into(),
            revision_id: revision.revision_id,
            long_headline: revision.headline,
            short_headline: revision.short_headline,
            slug: revision.slug,
            snippet: revision.snippet,
            content: revision.content,
            section_id: revision.section_id,
            authors: revision.author_ids,
            tags: revision.tags,
            topics: revision.topics,
            importance: revision.importance,
            is_published: revision.published,
            published_at: revision.published_at,
            recorded_at: revision.recorded_at,
        }
    }
}
