use super::super::map_sqlx;
use crate::domain::common::{ListWindow, SectionId, Slug};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::section::{NewSection, Section, SectionRepository, SectionUpdate};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresSectionRepository {
    pool: PgPool,
}

impl PostgresSectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SectionRow {
    id: i64,
    name: String,
    slug: String,
}

impl TryFrom<SectionRow> for Section {
    type Error = DomainError;

    fn try_from(row: SectionRow) -> Result<Self, Self::Error> {
        Ok(Section {
            id: SectionId::new(row.id)?,
            name: row.name,
            slug: Slug::new(row.slug)?,
        })
    }
}

#[async_trait]
impl SectionRepository for PostgresSectionRepository {
    async fn insert(&self, section: NewSection) -> DomainResult<Section> {
        let row = sqlx::query_as::<_, SectionRow>(
            "INSERT INTO sections (name, slug) VALUES ($1, $2) RETURNING id, name, slug",
        )
        .bind(section.name)
        .bind(section.slug.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Section::try_from(row)
    }

    async fn update(&self, update: SectionUpdate) -> DomainResult<Section> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE sections SET id = id");
        if let Some(name) = update.name {
            builder.push(", name = ");
            builder.push_bind(name);
        }
        if let Some(slug) = update.slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(update.id));
        builder.push(" RETURNING id, name, slug");

        builder
            .build_query_as::<SectionRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("section not found".into()))
            .and_then(Section::try_from)
    }

    async fn delete(&self, id: SectionId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("section not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: SectionId) -> DomainResult<Option<Section>> {
        sqlx::query_as::<_, SectionRow>("SELECT id, name, slug FROM sections WHERE id = $1")
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Section::try_from)
            .transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Section>> {
        sqlx::query_as::<_, SectionRow>("SELECT id, name, slug FROM sections WHERE slug = $1")
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Section::try_from)
            .transpose()
    }

    async fn list(&self, window: ListWindow) -> DomainResult<Vec<Section>> {
        sqlx::query_as::<_, SectionRow>(
            "SELECT id, name, slug FROM sections ORDER BY name, id LIMIT $1 OFFSET $2",
        )
        .bind(i64::from(window.limit))
        .bind(i64::from(window.offset))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(Section::try_from)
        .collect()
    }
}
