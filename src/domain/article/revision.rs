use crate::domain::article::entity::Article;
use crate::domain::article::value_objects::ArticleId;
use chrono::{DateTime, Utc};

/// Frozen copy of an article as it stood after one create or update.
#[derive(Debug, Clone)]
pub struct ArticleRevision {
    pub article_id: ArticleId,
    pub revision_id: i32,
    pub headline: String,
    pub short_headline: Option<String>,
    pub slug: String,
    pub snippet: Option<String>,
    pub content: String,
    pub section_id: i64,
    pub author_ids: Vec<i64>,
    pub tags: Vec<String>,
    pub topics: Vec<String>,
    pub importance: i16,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub recorded_at: DateTime<Utc>,
}

impl ArticleRevision {
    pub fn snapshot(article: &Article, recorded_at: DateTime<Utc>) -> Self {
        Self {
            article_id: article.id,
            revision_id: article.revision_id,
            headline: article.headline.as_str().to_string(),
            short_headline: article.short_headline.clone(),
            slug: article.slug.as_str().to_string(),
            snippet: article.snippet.clone(),
            content: article.content.clone(),
            section_id: article.section_id.into(),
            author_ids: article.author_ids.iter().copied().map(i64::from).collect(),
            tags: article
                .tags
                .iter()
                .map(|tag| tag.name.as_str().to_string())
                .collect(),
            topics: article.topics.clone(),
            importance: i16::from(article.importance.value()),
            published: article.published,
            published_at: article.published_at,
            recorded_at,
        }
    }
}
