use super::super::map_sqlx;
use crate::domain::article::{ArticleId, ArticleRevision, ArticleRevisionRepository};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const REVISION_COLUMNS: &str = "article_id, revision_id, headline, short_headline, slug, snippet,
    content, section_id, author_ids, tags, topics, importance, published, published_at, recorded_at";

#[derive(Clone)]
pub struct PostgresArticleRevisionRepository {
    pool: PgPool,
}

impl PostgresArticleRevisionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRevisionRow {
    article_id: i64,
    revision_id: i32,
    headline: String,
    short_headline: Option<String>,
    slug: String,
    snippet: Option<String>,
    content: String,
    section_id: i64,
    author_ids: Vec<i64>,
    tags: Vec<String>,
    topics: Vec<String>,
    importance: i16,
    published: bool,
    published_at: Option<DateTime<Utc>>,
    recorded_at: DateTime<Utc>,
}

impl TryFrom<ArticleRevisionRow> for ArticleRevision {
    type Error = DomainError;

    fn try_from(row: ArticleRevisionRow) -> Result<Self, Self::Error> {
        Ok(ArticleRevision {
            article_id: ArticleId::new(row.article_id)?,
            revision_id: row.revision_id,
            headline: row.headline,
            short_headline: row.short_headline,
            slug: row.slug,
            snippet: row.snippet,
            content: row.content,
            section_id: row.section_id,
            author_ids: row.author_ids,
            tags: row.tags,
            topics: row.topics,
            importance: row.importance,
            published: row.published,
            published_at: row.published_at,
            recorded_at: row.recorded_at,
        })
    }
}

#[async_trait]
impl ArticleRevisionRepository for PostgresArticleRevisionRepository {
    async fn append(&self, revision: ArticleRevision) -> DomainResult<()> {
        sqlx::query(&format!(
            "INSERT INTO article_revisions ({REVISION_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             ON CONFLICT (article_id, revision_id) DO NOTHING"
        ))
        .bind(i64::from(revision.article_id))
        .bind(revision.revision_id)
        .bind(revision.headline)
        .bind(revision.short_headline)
        .bind(revision.slug)
        .bind(revision.snippet)
        .bind(revision.content)
        .bind(revision.section_id)
        .bind(revision.author_ids)
        .bind(revision.tags)
        .bind(revision.topics)
        .bind(revision.importance)
        .bind(revision.published)
        .bind(revision.published_at)
        .bind(revision.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn find(
        &self,
        article_id: ArticleId,
        revision_id: i32,
    ) -> DomainResult<Option<ArticleRevision>> {
        sqlx::query_as::<_, ArticleRevisionRow>(&format!(
            "SELECT {REVISION_COLUMNS} FROM article_revisions
             WHERE article_id = $1 AND revision_id = $2"
        ))
        .bind(i64::from(article_id))
        .bind(revision_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .map(ArticleRevision::try_from)
        .transpose()
    }

    async fn list_by_article(&self, article_id: ArticleId) -> DomainResult<Vec<ArticleRevision>> {
        let rows = sqlx::query_as::<_, ArticleRevisionRow>(&format!(
            "SELECT {REVISION_COLUMNS} FROM article_revisions
             WHERE article_id = $1
             ORDER BY revision_id DESC"
        ))
        .bind(i64::from(article_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(ArticleRevision::try_from).collect()
    }
}
