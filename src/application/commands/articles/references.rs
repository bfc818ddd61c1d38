use super::ArticleCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::common::{PersonId, SectionId, TagId},
};

impl ArticleCommandService {
    pub(super) async fn ensure_section(&self, id: i64) -> ApplicationResult<SectionId> {
        let id = SectionId::new(id)?;
        match self.section_repo.find_by_id(id).await? {
            Some(_) => Ok(id),
            None => Err(ApplicationError::validation(format!("section {id} does not exist"))),
        }
    }

    pub(super) async fn ensure_authors(&self, ids: &[i64]) -> ApplicationResult<Vec<PersonId>> {
        let mut authors = Vec::with_capacity(ids.len());
        for raw in ids {
            let id = PersonId::new(*raw)?;
            if self.person_repo.find_by_id(id).await?.is_none() {
                return Err(ApplicationError::validation(format!(
                    "person {id} does not exist"
                )));
            }
            if !authors.contains(&id) {
                authors.push(id);
            }
        }
        Ok(authors)
    }

    pub(super) async fn ensure_tags(&self, ids: &[i64]) -> ApplicationResult<Vec<TagId>> {
        let mut tags = Vec::with_capacity(ids.len());
        for raw in ids {
            let id = TagId::new(*raw)?;
            if self.tag_repo.find_by_id(id).await?.is_none() {
                return Err(ApplicationError::validation(format!("tag {id} does not exist")));
            }
            if !tags.contains(&id) {
                tags.push(id);
            }
        }
        Ok(tags)
    }
}
