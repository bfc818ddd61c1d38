use super::{AttachmentRecord, InMemoryStore, Tables, contains_ignore_case, window};
use crate::domain::article::ArticleId;
use crate::domain::common::{AttachmentId, ImageId, ListWindow, PersonId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::image::{
    Image, ImageAttachment, ImageAttachmentRepository, ImageFilter, ImageOrdering,
    ImageRepository, ImageUpdate, NewImage, NewImageAttachment,
};
use async_trait::async_trait;

#[derive(Clone)]
pub struct InMemoryImageRepository {
    store: InMemoryStore,
}

impl InMemoryImageRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
    async fn insert(&self, image: NewImage) -> DomainResult<Image> {
        let mut tables = self.store.tables().lock().await;
        let id = tables.image_ids.next();
        let stored = Image {
            id: ImageId::new(id)?,
            title: image.title,
            filename: image.filename,
            caption: image.caption,
            authors: Vec::new(),
            created_at: image.created_at,
            updated_at: image.created_at,
        };
        tables.images.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: ImageUpdate) -> DomainResult<Image> {
        let mut tables = self.store.tables().lock().await;
        let image = tables
            .images
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("image not found".into()))?;
        if let Some(title) = update.title {
            image.title = title;
        }
        if let Some(filename) = update.filename {
            image.filename = filename;
        }
        if let Some(caption) = update.caption {
            image.caption = caption;
        }
        image.updated_at = update.updated_at;
        Ok(image.clone())
    }

    async fn save_authors(&self, id: ImageId, authors: &[PersonId]) -> DomainResult<()> {
        let mut tables = self.store.tables().lock().await;
        let image = tables
            .images
            .get_mut(&i64::from(id))
            .ok_or_else(|| DomainError::NotFound("image not found".into()))?;
        image.authors = authors.to_vec();
        Ok(())
    }

    async fn delete(&self, id: ImageId) -> DomainResult<()> {
        let mut tables = self.store.tables().lock().await;
        if tables.images.remove(&i64::from(id)).is_none() {
            return Err(DomainError::NotFound("image not found".into()));
        }
        tables
            .attachments
            .retain(|_, attachment| attachment.image_id != id);
        Ok(())
    }

    async fn find_by_id(&self, id: ImageId) -> DomainResult<Option<Image>> {
        let tables = self.store.tables().lock().await;
        Ok(tables.images.get(&i64::from(id)).cloned())
    }

    async fn list(&self, filter: &ImageFilter) -> DomainResult<Vec<Image>> {
        let tables = self.store.tables().lock().await;
        let mut images: Vec<Image> = tables
            .images
            .values()
            .filter(|image| {
                filter.search.as_deref().is_none_or(|q| {
                    contains_ignore_case(&image.filename, q)
                        || image
                            .title
                            .as_deref()
                            .is_some_and(|title| contains_ignore_case(title, q))
                })
            })
            .cloned()
            .collect();
        images.sort_by(|a, b| {
            let order = a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id));
            match filter.ordering {
                ImageOrdering::CreatedAsc => order,
                ImageOrdering::CreatedDesc => order.reverse(),
            }
        });
        Ok(window(images, filter.window))
    }
}

#[derive(Clone)]
pub struct InMemoryImageAttachmentRepository {
    store: InMemoryStore,
}

impl InMemoryImageAttachmentRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn hydrate(tables: &Tables, record: &AttachmentRecord) -> DomainResult<ImageAttachment> {
    let image = tables
        .images
        .get(&i64::from(record.image_id))
        .cloned()
        .ok_or_else(|| DomainError::NotFound("attached image not found".into()))?;
    Ok(ImageAttachment {
        id: AttachmentId::new(record.id)?,
        article_id: ArticleId::new(record.article_id)?,
        image,
        caption: record.caption.clone(),
        credit: record.credit.clone(),
        position: record.position,
    })
}

#[async_trait]
impl ImageAttachmentRepository for InMemoryImageAttachmentRepository {
    async fn insert(&self, attachment: NewImageAttachment) -> DomainResult<ImageAttachment> {
        let mut tables = self.store.tables().lock().await;
        let article_id = i64::from(attachment.article_id);
        if !tables.articles.contains_key(&article_id)
            || !tables.images.contains_key(&i64::from(attachment.image_id))
        {
            return Err(DomainError::NotFound("referenced record not found".into()));
        }
        let position = tables
            .attachments
            .values()
            .filter(|stored| stored.article_id == article_id)
            .map(|stored| stored.position)
            .max()
            .unwrap_or(0)
            + 1;
        let id = tables.attachment_ids.next();
        let record = AttachmentRecord {
            id,
            article_id,
            image_id: attachment.image_id,
            caption: attachment.caption,
            credit: attachment.credit,
            position,
        };
        let hydrated = hydrate(&tables, &record)?;
        tables.attachments.insert(id, record);
        Ok(hydrated)
    }

    async fn list(
        &self,
        article: Option<ArticleId>,
        list_window: ListWindow,
    ) -> DomainResult<Vec<ImageAttachment>> {
        let tables = self.store.tables().lock().await;
        let mut records: Vec<&AttachmentRecord> = tables
            .attachments
            .values()
            .filter(|record| article.is_none_or(|id| record.article_id == i64::from(id)))
            .collect();
        records.sort_by_key(|record| (record.article_id, record.position, record.id));
        window(records, list_window)
            .into_iter()
            .map(|record| hydrate(&tables, record))
            .collect()
    }
}
