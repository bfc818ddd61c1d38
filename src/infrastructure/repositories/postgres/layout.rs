use super::super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::layout::{
    ComponentSlug, FieldData, LayoutRepository, LayoutUnitOfWork, NewPlacement, Page, PageHandle,
    PageId, PageSlug, Placement, PlacementId, SpotId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction, types::Json};

const PLACEMENT_COLUMNS: &str = "id, page_id, spot, component, data, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresLayoutRepository {
    pool: PgPool,
}

impl PostgresLayoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PageRow {
    id: i64,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct PlacementRow {
    id: i64,
    page_id: i64,
    spot: String,
    component: String,
    data: Json<FieldData>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PlacementRow> for Placement {
    type Error = DomainError;

    fn try_from(row: PlacementRow) -> Result<Self, Self::Error> {
        Ok(Placement {
            id: PlacementId(row.id),
            page_id: PageId(row.page_id),
            spot: SpotId::new(row.spot)?,
            component: ComponentSlug::new(row.component)?,
            data: row.data.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl LayoutRepository for PostgresLayoutRepository {
    async fn find_page(&self, slug: &PageSlug) -> DomainResult<Option<Page>> {
        let Some(row) = sqlx::query_as::<_, PageRow>(
            "SELECT id, slug, created_at, updated_at FROM pages WHERE slug = $1",
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        else {
            return Ok(None);
        };

        let placements = sqlx::query_as::<_, PlacementRow>(&format!(
            "SELECT {PLACEMENT_COLUMNS} FROM page_components WHERE page_id = $1 ORDER BY spot"
        ))
        .bind(row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(Placement::try_from)
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Page {
            id: PageId(row.id),
            slug: PageSlug::new(row.slug)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            placements,
        }))
    }

    async fn delete_page(&self, slug: &PageSlug) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM pages WHERE slug = $1")
            .bind(slug.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn begin(&self) -> DomainResult<Box<dyn LayoutUnitOfWork>> {
        let tx = self.pool.begin().await.map_err(map_sqlx)?;
        Ok(Box::new(PostgresLayoutUnitOfWork { tx }))
    }
}

/// One database transaction. Dropping it without `commit` rolls back.
pub struct PostgresLayoutUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl LayoutUnitOfWork for PostgresLayoutUnitOfWork {
    async fn find_or_create_page(
        &mut self,
        slug: &PageSlug,
        now: DateTime<Utc>,
    ) -> DomainResult<PageHandle> {
        let inserted: Option<i64> = sqlx::query_scalar(
            "INSERT INTO pages (slug, created_at, updated_at) VALUES ($1, $2, $2)
             ON CONFLICT (slug) DO NOTHING
             RETURNING id",
        )
        .bind(slug.as_str())
        .bind(now)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;

        if let Some(id) = inserted {
            return Ok(PageHandle {
                id: PageId(id),
                created: true,
            });
        }

        let id: i64 = sqlx::query_scalar("SELECT id FROM pages WHERE slug = $1 FOR UPDATE")
            .bind(slug.as_str())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx)?;
        Ok(PageHandle {
            id: PageId(id),
            created: false,
        })
    }

    async fn find_page_id(&mut self, slug: &PageSlug) -> DomainResult<Option<PageId>> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM pages WHERE slug = $1 FOR UPDATE")
            .bind(slug.as_str())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx)?;
        Ok(id.map(PageId))
    }

    async fn find_placement(
        &mut self,
        page: PageId,
        spot: &SpotId,
    ) -> DomainResult<Option<Placement>> {
        sqlx::query_as::<_, PlacementRow>(&format!(
            "SELECT {PLACEMENT_COLUMNS} FROM page_components
             WHERE page_id = $1 AND spot = $2
             FOR UPDATE"
        ))
        .bind(i64::from(page))
        .bind(spot.as_str())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_sqlx)?
        .map(Placement::try_from)
        .transpose()
    }

    async fn remove_placement(&mut self, id: PlacementId) -> DomainResult<()> {
        sqlx::query("DELETE FROM page_components WHERE id = $1")
            .bind(i64::from(id))
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn put_placement(&mut self, placement: NewPlacement) -> DomainResult<Placement> {
        let NewPlacement {
            page_id,
            spot,
            component,
            data,
            now,
        } = placement;

        let row = sqlx::query_as::<_, PlacementRow>(&format!(
            "INSERT INTO page_components (page_id, spot, component, data, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             ON CONFLICT (page_id, spot) DO UPDATE
                SET component = EXCLUDED.component,
                    data = EXCLUDED.data,
                    updated_at = EXCLUDED.updated_at
             RETURNING {PLACEMENT_COLUMNS}"
        ))
        .bind(i64::from(page_id))
        .bind(spot.as_str())
        .bind(component.as_str())
        .bind(Json(data))
        .bind(now)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;

        Placement::try_from(row)
    }

    async fn touch_page(&mut self, page: PageId, now: DateTime<Utc>) -> DomainResult<()> {
        sqlx::query("UPDATE pages SET updated_at = $2 WHERE id = $1")
            .bind(i64::from(page))
            .bind(now)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.tx.commit().await.map_err(map_sqlx)
    }
}
