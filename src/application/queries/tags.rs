use std::sync::Arc;

use crate::{
    application::{
        dto::{PageRequest, ResourcePage, TagDto, pagination::DEFAULT_LIMIT},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{common::TagId, tag::TagRepository},
};

pub struct TagQueryService {
    repo: Arc<dyn TagRepository>,
}

impl TagQueryService {
    pub fn new(repo: Arc<dyn TagRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_tag(&self, id: i64) -> ApplicationResult<TagDto> {
        let id = TagId::new(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .map(TagDto::from)
            .ok_or_else(|| ApplicationError::not_found("tag not found"))
    }

    /// `q` matches anywhere in the tag name, ignoring case.
    pub async fn list_tags(
        &self,
        q: Option<String>,
        page: PageRequest,
    ) -> ApplicationResult<ResourcePage<TagDto>> {
        let window = page.window(DEFAULT_LIMIT);
        let q = q.filter(|q| !q.trim().is_empty());
        let rows = self.repo.list(q.as_deref().map(str::trim), window.probe()).await?;
        Ok(ResourcePage::from_probe(rows, window.limit, window.offset).map(TagDto::from))
    }
}
