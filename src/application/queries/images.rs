use std::sync::Arc;

use crate::{
    application::{
        dto::{ImageDto, PageRequest, ResourcePage},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        common::ImageId,
        image::{ImageFilter, ImageOrdering, ImageRepository},
    },
};

pub const IMAGE_PAGE_SIZE: u32 = 30;

#[derive(Debug, Default)]
pub struct ListImagesQuery {
    /// Matched against title and filename.
    pub q: Option<String>,
    /// `created_at` or `-created_at`.
    pub ordering: Option<String>,
    pub page: PageRequest,
}

pub struct ImageQueryService {
    repo: Arc<dyn ImageRepository>,
}

impl ImageQueryService {
    pub fn new(repo: Arc<dyn ImageRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_image(&self, id: i64) -> ApplicationResult<ImageDto> {
        let id = ImageId::new(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .map(ImageDto::from)
            .ok_or_else(|| ApplicationError::not_found("image not found"))
    }

    pub async fn list_images(
        &self,
        query: ListImagesQuery,
    ) -> ApplicationResult<ResourcePage<ImageDto>> {
        let ordering = match query.ordering.as_deref() {
            None | Some("") => ImageOrdering::default(),
            Some(value) => ImageOrdering::parse(value).ok_or_else(|| {
                ApplicationError::validation(format!("unsupported ordering '{value}'"))
            })?,
        };
        let window = query.page.window(IMAGE_PAGE_SIZE);
        let filter = ImageFilter {
            search: query
                .q
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
            ordering,
            window: window.probe(),
        };
        let rows = self.repo.list(&filter).await?;
        Ok(ResourcePage::from_probe(rows, window.limit, window.offset).map(ImageDto::from))
    }
}
