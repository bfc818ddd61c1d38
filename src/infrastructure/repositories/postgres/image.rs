use super::{super::map_sqlx, article::escape_like};
use crate::domain::article::ArticleId;
use crate::domain::common::{AttachmentId, ImageId, ListWindow, PersonId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::image::{
    Image, ImageAttachment, ImageAttachmentRepository, ImageFilter, ImageOrdering,
    ImageRepository, ImageUpdate, NewImage, NewImageAttachment,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const IMAGE_SELECT: &str = "SELECT i.id, i.title, i.filename, i.caption, i.created_at, i.updated_at,
        ARRAY(SELECT ia.person_id FROM image_authors ia
              WHERE ia.image_id = i.id ORDER BY ia.position) AS author_ids
    FROM images i";

#[derive(Clone)]
pub struct PostgresImageRepository {
    pool: PgPool,
}

impl PostgresImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ImageRow {
    id: i64,
    title: Option<String>,
    filename: String,
    caption: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_ids: Vec<i64>,
}

impl TryFrom<ImageRow> for Image {
    type Error = DomainError;

    fn try_from(row: ImageRow) -> Result<Self, Self::Error> {
        Ok(Image {
            id: ImageId::new(row.id)?,
            title: row.title,
            filename: row.filename,
            caption: row.caption,
            authors: row
                .author_ids
                .into_iter()
                .map(PersonId::new)
                .collect::<DomainResult<Vec<_>>>()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl PostgresImageRepository {
    async fn fetch(&self, id: i64) -> DomainResult<Option<Image>> {
        sqlx::query_as::<_, ImageRow>(&format!("{IMAGE_SELECT} WHERE i.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Image::try_from)
            .transpose()
    }
}

#[async_trait]
impl ImageRepository for PostgresImageRepository {
    async fn insert(&self, image: NewImage) -> DomainResult<Image> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO images (title, filename, caption, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING id",
        )
        .bind(image.title)
        .bind(image.filename)
        .bind(image.caption)
        .bind(image.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.fetch(id)
            .await?
            .ok_or_else(|| DomainError::Persistence("inserted image vanished".into()))
    }

    async fn update(&self, update: ImageUpdate) -> DomainResult<Image> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE images SET updated_at = ");
        builder.push_bind(update.updated_at);
        if let Some(title) = update.title {
            builder.push(", title = ");
            builder.push_bind(title);
        }
        if let Some(filename) = update.filename {
            builder.push(", filename = ");
            builder.push_bind(filename);
        }
        if let Some(caption) = update.caption {
            builder.push(", caption = ");
            builder.push_bind(caption);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(update.id));

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("image not found".into()));
        }

        self.fetch(i64::from(update.id))
            .await?
            .ok_or_else(|| DomainError::NotFound("image not found".into()))
    }

    async fn save_authors(&self, id: ImageId, authors: &[PersonId]) -> DomainResult<()> {
        let authors: Vec<i64> = authors.iter().copied().map(i64::from).collect();
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        sqlx::query("DELETE FROM image_authors WHERE image_id = $1")
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        sqlx::query(
            "INSERT INTO image_authors (image_id, person_id, position)
             SELECT $1, u.person_id, u.ord::int
             FROM UNNEST($2::bigint[]) WITH ORDINALITY AS u(person_id, ord)",
        )
        .bind(i64::from(id))
        .bind(authors)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        tx.commit().await.map_err(map_sqlx)
    }

    async fn delete(&self, id: ImageId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("image not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ImageId) -> DomainResult<Option<Image>> {
        self.fetch(i64::from(id)).await
    }

    async fn list(&self, filter: &ImageFilter) -> DomainResult<Vec<Image>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(IMAGE_SELECT);
        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", escape_like(search));
            builder.push(" WHERE (i.title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR i.filename ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        builder.push(match filter.ordering {
            ImageOrdering::CreatedAsc => " ORDER BY i.created_at ASC, i.id ASC",
            ImageOrdering::CreatedDesc => " ORDER BY i.created_at DESC, i.id DESC",
        });
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(filter.window.limit));
        builder.push(" OFFSET ");
        builder.push_bind(i64::from(filter.window.offset));

        builder
            .build_query_as::<ImageRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(Image::try_from)
            .collect()
    }
}

#[derive(Clone)]
pub struct PostgresImageAttachmentRepository {
    pool: PgPool,
    images: PostgresImageRepository,
}

impl PostgresImageAttachmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            images: PostgresImageRepository::new(pool.clone()),
            pool,
        }
    }

    async fn hydrate(&self, row: AttachmentRow) -> DomainResult<ImageAttachment> {
        let image = self
            .images
            .fetch(row.image_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("attached image not found".into()))?;
        Ok(ImageAttachment {
            id: AttachmentId::new(row.id)?,
            article_id: ArticleId::new(row.article_id)?,
            image,
            caption: row.caption,
            credit: row.credit,
            position: row.position,
        })
    }
}

#[derive(Debug, FromRow)]
struct AttachmentRow {
    id: i64,
    article_id: i64,
    image_id: i64,
    caption: Option<String>,
    credit: Option<String>,
    position: i32,
}

#[async_trait]
impl ImageAttachmentRepository for PostgresImageAttachmentRepository {
    async fn insert(&self, attachment: NewImageAttachment) -> DomainResult<ImageAttachment> {
        let row = sqlx::query_as::<_, AttachmentRow>(
            "INSERT INTO image_attachments (article_id, image_id, caption, credit, position)
             SELECT $1, $2, $3, $4, COALESCE(MAX(position) + 1, 1)
             FROM image_attachments WHERE article_id = $1
             RETURNING id, article_id, image_id, caption, credit, position",
        )
        .bind(i64::from(attachment.article_id))
        .bind(i64::from(attachment.image_id))
        .bind(attachment.caption)
        .bind(attachment.credit)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        self.hydrate(row).await
    }

    async fn list(
        &self,
        article: Option<ArticleId>,
        window: ListWindow,
    ) -> DomainResult<Vec<ImageAttachment>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, article_id, image_id, caption, credit, position FROM image_attachments",
        );
        if let Some(article) = article {
            builder.push(" WHERE article_id = ");
            builder.push_bind(i64::from(article));
        }
        builder.push(" ORDER BY article_id, position, id LIMIT ");
        builder.push_bind(i64::from(window.limit));
        builder.push(" OFFSET ");
        builder.push_bind(i64::from(window.offset));

        let rows = builder
            .build_query_as::<AttachmentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut attachments = Vec::with_capacity(rows.len());
        for row in rows {
            attachments.push(self.hydrate(row).await?);
        }
        Ok(attachments)
    }
}
