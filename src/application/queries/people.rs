use std::sync::Arc;

use crate::{
    application::{
        dto::{PageRequest, PersonDto, ResourcePage, pagination::DEFAULT_LIMIT},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{common::PersonId, person::PersonRepository},
};

pub struct PersonQueryService {
    repo: Arc<dyn PersonRepository>,
}

impl PersonQueryService {
    pub fn new(repo: Arc<dyn PersonRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_person(&self, id: i64) -> ApplicationResult<PersonDto> {
        let id = PersonId::new(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .map(PersonDto::from)
            .ok_or_else(|| ApplicationError::not_found("person not found"))
    }

    pub async fn list_people(
        &self,
        q: Option<String>,
        page: PageRequest,
    ) -> ApplicationResult<ResourcePage<PersonDto>> {
        let window = page.window(DEFAULT_LIMIT);
        let q = q.filter(|q| !q.trim().is_empty());
        let rows = self.repo.list(q.as_deref().map(str::trim), window.probe()).await?;
        Ok(ResourcePage::from_probe(rows, window.limit, window.offset).map(PersonDto::from))
    }
}
