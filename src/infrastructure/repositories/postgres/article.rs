use super::super::map_sqlx;
use crate::domain::article::{
    Article, ArticleFilter, ArticleId, ArticleReadRepository, ArticleSlug, ArticleUpdate,
    ArticleWriteRepository, Headline, Importance, NewArticle,
};
use crate::domain::common::{PersonId, SectionId, TagId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::tag::{Tag, TagName};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};

const ARTICLE_SELECT: &str = "SELECT a.id, a.revision_id, a.headline, a.short_headline, a.slug,
        a.snippet, a.content, a.section_id, a.topics, a.importance, a.published,
        a.published_at, a.created_at, a.updated_at,
        ARRAY(SELECT aa.person_id FROM article_authors aa
              WHERE aa.article_id = a.id ORDER BY aa.position) AS author_ids,
        ARRAY(SELECT t.id FROM article_tags atg JOIN tags t ON t.id = atg.tag_id
              WHERE atg.article_id = a.id ORDER BY t.name, t.id) AS tag_ids,
        ARRAY(SELECT t.name FROM article_tags atg JOIN tags t ON t.id = atg.tag_id
              WHERE atg.article_id = a.id ORDER BY t.name, t.id) AS tag_names
    FROM articles a";

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    revision_id: i32,
    headline: String,
    short_headline: Option<String>,
    slug: String,
    snippet: Option<String>,
    content: String,
    section_id: i64,
    topics: Vec<String>,
    importance: i16,
    published: bool,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_ids: Vec<i64>,
    tag_ids: Vec<i64>,
    tag_names: Vec<String>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let tags = row
            .tag_ids
            .into_iter()
            .zip(row.tag_names)
            .map(|(id, name)| {
                Ok(Tag {
                    id: TagId::new(id)?,
                    name: TagName::new(name)?,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Article {
            id: ArticleId::new(row.id)?,
            revision_id: row.revision_id,
            headline: Headline::new(row.headline)?,
            short_headline: row.short_headline,
            slug: ArticleSlug::new(row.slug)?,
            snippet: row.snippet,
            content: row.content,
            section_id: SectionId::new(row.section_id)?,
            author_ids: row
                .author_ids
                .into_iter()
                .map(PersonId::new)
                .collect::<DomainResult<Vec<_>>>()?,
            tags,
            topics: row.topics,
            importance: Importance::new(i64::from(row.importance))?,
            published: row.published,
            published_at: row.published_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

async fn fetch_article(conn: &mut PgConnection, id: i64) -> DomainResult<Option<Article>> {
    sqlx::query_as::<_, ArticleRow>(&format!("{ARTICLE_SELECT} WHERE a.id = $1"))
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(map_sqlx)?
        .map(Article::try_from)
        .transpose()
}

async fn replace_authors(conn: &mut PgConnection, id: i64, authors: &[PersonId]) -> DomainResult<()> {
    let authors: Vec<i64> = authors.iter().copied().map(i64::from).collect();
    sqlx::query("DELETE FROM article_authors WHERE article_id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    sqlx::query(
        "INSERT INTO article_authors (article_id, person_id, position)
         SELECT $1, u.person_id, u.ord::int
         FROM UNNEST($2::bigint[]) WITH ORDINALITY AS u(person_id, ord)",
    )
    .bind(id)
    .bind(authors)
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}

async fn replace_tags(conn: &mut PgConnection, id: i64, tags: &[TagId]) -> DomainResult<()> {
    let tags: Vec<i64> = tags.iter().copied().map(i64::from).collect();
    sqlx::query("DELETE FROM article_tags WHERE article_id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    sqlx::query(
        "INSERT INTO article_tags (article_id, tag_id)
         SELECT $1, t FROM UNNEST($2::bigint[]) AS t
         ON CONFLICT DO NOTHING",
    )
    .bind(id)
    .bind(tags)
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            headline,
            short_headline,
            slug,
            snippet,
            content,
            section_id,
            author_ids,
            tag_ids,
            topics,
            importance,
            published,
            published_at,
            created_at,
            updated_at,
        } = article;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO articles (headline, short_headline, slug, snippet, content, section_id,
                                   topics, importance, published, published_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING id",
        )
        .bind(headline.as_str())
        .bind(short_headline)
        .bind(slug.as_str())
        .bind(snippet)
        .bind(content)
        .bind(i64::from(section_id))
        .bind(topics)
        .bind(i16::from(importance.value()))
        .bind(published)
        .bind(published_at)
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        replace_authors(&mut tx, id, &author_ids).await?;
        replace_tags(&mut tx, id, &tag_ids).await?;
        let created = fetch_article(&mut tx, id)
            .await?
            .ok_or_else(|| DomainError::Persistence("inserted article vanished".into()))?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(created)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
            headline,
            short_headline,
            slug,
            snippet,
            content,
            section_id,
            author_ids,
            tag_ids,
            topics,
            importance,
            publish_state,
            original_revision,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "UPDATE articles SET revision_id = revision_id + 1, updated_at = ",
        );
        builder.push_bind(updated_at);

        if let Some(headline) = headline {
            builder.push(", headline = ");
            builder.push_bind(headline.into_inner());
        }
        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }
        if let Some(short_headline) = short_headline {
            builder.push(", short_headline = ");
            builder.push_bind(short_headline);
        }
        if let Some(snippet) = snippet {
            builder.push(", snippet = ");
            builder.push_bind(snippet);
        }
        if let Some(content) = content {
            builder.push(", content = ");
            builder.push_bind(content);
        }
        if let Some(section_id) = section_id {
            builder.push(", section_id = ");
            builder.push_bind(i64::from(section_id));
        }
        if let Some(topics) = topics {
            builder.push(", topics = ");
            builder.push_bind(topics);
        }
        if let Some(importance) = importance {
            builder.push(", importance = ");
            builder.push_bind(i16::from(importance.value()));
        }
        if let Some(state) = publish_state {
            builder.push(", published = ");
            builder.push_bind(state.published);
            builder.push(", published_at = ");
            builder.push_bind(state.published_at);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" AND revision_id = ");
        builder.push_bind(original_revision);
        builder.push(" RETURNING id");

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let updated: Option<i64> = builder
            .build_query_scalar()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        let Some(row_id) = updated else {
            return Err(DomainError::Conflict(
                "article was modified concurrently, please retry".into(),
            ));
        };

        if let Some(author_ids) = author_ids {
            replace_authors(&mut tx, row_id, &author_ids).await?;
        }
        if let Some(tag_ids) = tag_ids {
            replace_tags(&mut tx, row_id, &tag_ids).await?;
        }
        let article = fetch_article(&mut tx, row_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(article)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }
}

impl PostgresArticleReadRepository {
    fn apply_conditions<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &'a ArticleFilter) {
        builder.push(" WHERE TRUE");
        if filter.published_only {
            builder.push(" AND a.published = TRUE");
        }
        if let Some(section_id) = filter.section_id {
            builder.push(" AND a.section_id = ");
            builder.push_bind(i64::from(section_id));
        }
        if let Some(tag) = &filter.tag {
            builder.push(
                " AND EXISTS (SELECT 1 FROM article_tags atg JOIN tags t ON t.id = atg.tag_id
                   WHERE atg.article_id = a.id AND t.name = ",
            );
            builder.push_bind(tag.as_str());
            builder.push(")");
        }
        if let Some(topic) = &filter.topic {
            builder.push(" AND ");
            builder.push_bind(topic.as_str());
            builder.push(" = ANY(a.topics)");
        }
        if let Some(search) = &filter.search {
            builder.push(" AND a.headline ILIKE ");
            builder.push_bind(format!("%{}%", escape_like(search)));
        }
    }
}

pub(super) fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        fetch_article(&mut conn, i64::from(id)).await
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        sqlx::query_as::<_, ArticleRow>(&format!("{ARTICLE_SELECT} WHERE a.slug = $1"))
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Article::try_from)
            .transpose()
    }

    async fn list(&self, filter: &ArticleFilter) -> DomainResult<Vec<Article>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(ARTICLE_SELECT);
        Self::apply_conditions(&mut builder, filter);
        builder.push(" ORDER BY a.published_at DESC NULLS LAST, a.id DESC LIMIT ");
        builder.push_bind(i64::from(filter.window.limit));
        builder.push(" OFFSET ");
        builder.push_bind(i64::from(filter.window.offset));

        builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(Article::try_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
    }
}
