use std::sync::Arc;

use crate::{
    application::{
        dto::{PageRequest, ResourcePage, SectionDto, pagination::DEFAULT_LIMIT},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{common::SectionId, section::SectionRepository},
};

pub struct SectionQueryService {
    repo: Arc<dyn SectionRepository>,
}

impl SectionQueryService {
    pub fn new(repo: Arc<dyn SectionRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_section(&self, id: i64) -> ApplicationResult<SectionDto> {
        let id = SectionId::new(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .map(SectionDto::from)
            .ok_or_else(|| ApplicationError::not_found("section not found"))
    }

    pub async fn list_sections(
        &self,
        page: PageRequest,
    ) -> ApplicationResult<ResourcePage<SectionDto>> {
        let window = page.window(DEFAULT_LIMIT);
        let rows = self.repo.list(window.probe()).await?;
        Ok(ResourcePage::from_probe(rows, window.limit, window.offset).map(SectionDto::from))
    }
}
