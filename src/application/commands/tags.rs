use std::sync::Arc;

use crate::{
    application::{
        dto::TagDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        common::TagId,
        tag::{TagName, TagRepository},
    },
};
use tracing::{debug, info};

/// Result of a tag create; `created` is false when the name already existed.
#[derive(Debug, Clone)]
pub struct TagCreated {
    pub tag: TagDto,
    pub created: bool,
}

pub struct TagCommandService {
    repo: Arc<dyn TagRepository>,
}

impl TagCommandService {
    pub fn new(repo: Arc<dyn TagRepository>) -> Self {
        Self { repo }
    }

    /// Creating a tag whose name exists returns the stored tag instead of failing.
    pub async fn create_tag(&self, name: String) -> ApplicationResult<TagCreated> {
        let name = TagName::new(name)?;
        let (tag, created) = self.repo.insert_if_absent(name).await?;
        if created {
            info!(tag_id = %tag.id, name = tag.name.as_str(), "tag created");
        } else {
            debug!(tag_id = %tag.id, "tag already exists");
        }
        Ok(TagCreated {
            tag: tag.into(),
            created,
        })
    }

    pub async fn rename_tag(&self, id: i64, name: String) -> ApplicationResult<TagDto> {
        let id = TagId::new(id)?;
        let name = TagName::new(name)?;
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("tag not found"));
        }
        if let Some(existing) = self.repo.find_by_name(&name).await? {
            if existing.id != id {
                return Err(ApplicationError::conflict(format!(
                    "tag '{}' already exists",
                    name.as_str()
                )));
            }
        }
        Ok(self.repo.rename(id, name).await?.into())
    }

    pub async fn delete_tag(&self, id: i64) -> ApplicationResult<()> {
        let id = TagId::new(id)?;
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("tag not found"));
        }
        self.repo.delete(id).await?;
        Ok(())
    }
}
