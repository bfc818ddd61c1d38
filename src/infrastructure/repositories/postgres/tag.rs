use super::{super::map_sqlx, article::escape_like};
use crate::domain::common::{ListWindow, TagId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::tag::{Tag, TagName, TagRepository};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TagRow {
    id: i64,
    name: String,
}

impl TryFrom<TagRow> for Tag {
    type Error = DomainError;

    fn try_from(row: TagRow) -> Result<Self, Self::Error> {
        Ok(Tag {
            id: TagId::new(row.id)?,
            name: TagName::new(row.name)?,
        })
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn insert_if_absent(&self, name: TagName) -> DomainResult<(Tag, bool)> {
        let inserted = sqlx::query_as::<_, TagRow>(
            "INSERT INTO tags (name) VALUES ($1)
             ON CONFLICT (name) DO NOTHING
             RETURNING id, name",
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if let Some(row) = inserted {
            return Ok((Tag::try_from(row)?, true));
        }

        let existing = sqlx::query_as::<_, TagRow>("SELECT id, name FROM tags WHERE name = $1")
            .bind(name.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok((Tag::try_from(existing)?, false))
    }

    async fn rename(&self, id: TagId, name: TagName) -> DomainResult<Tag> {
        sqlx::query_as::<_, TagRow>("UPDATE tags SET name = $2 WHERE id = $1 RETURNING id, name")
            .bind(i64::from(id))
            .bind(name.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("tag not found".into()))
            .and_then(Tag::try_from)
    }

    async fn delete(&self, id: TagId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("tag not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TagId) -> DomainResult<Option<Tag>> {
        sqlx::query_as::<_, TagRow>("SELECT id, name FROM tags WHERE id = $1")
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Tag::try_from)
            .transpose()
    }

    async fn find_by_name(&self, name: &TagName) -> DomainResult<Option<Tag>> {
        sqlx::query_as::<_, TagRow>("SELECT id, name FROM tags WHERE name = $1")
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Tag::try_from)
            .transpose()
    }

    async fn list(&self, search: Option<&str>, window: ListWindow) -> DomainResult<Vec<Tag>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT id, name FROM tags");
        if let Some(search) = search {
            builder.push(" WHERE name ILIKE ");
            builder.push_bind(format!("%{}%", escape_like(search)));
        }
        builder.push(" ORDER BY name, id LIMIT ");
        builder.push_bind(i64::from(window.limit));
        builder.push(" OFFSET ");
        builder.push_bind(i64::from(window.offset));

        builder
            .build_query_as::<TagRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(Tag::try_from)
            .collect()
    }
}
