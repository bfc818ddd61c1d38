use std::sync::Arc;

use crate::{
    application::{
        dto::SectionDto,
        error::{ApplicationError, ApplicationResult},
        ports::util::SlugGenerator,
    },
    domain::{
        common::{SectionId, Slug, required_text},
        section::{NewSection, SectionRepository, SectionUpdate},
    },
};
use tracing::info;

const MAX_SECTION_NAME: usize = 100;

pub struct CreateSectionCommand {
    pub name: String,
    pub slug: Option<String>,
}

pub struct UpdateSectionCommand {
    pub id: i64,
    pub partial: bool,
    pub name: Option<String>,
    pub slug: Option<String>,
}

pub struct SectionCommandService {
    repo: Arc<dyn SectionRepository>,
    slugger: Arc<dyn SlugGenerator>,
}

impl SectionCommandService {
    pub fn new(repo: Arc<dyn SectionRepository>, slugger: Arc<dyn SlugGenerator>) -> Self {
        Self { repo, slugger }
    }

    pub async fn create_section(
        &self,
        command: CreateSectionCommand,
    ) -> ApplicationResult<SectionDto> {
        let name = required_text("name", command.name, MAX_SECTION_NAME)?;
        let slug = match command.slug {
            Some(slug) => Slug::new(slug)?,
            None => Slug::new(self.slugger.slugify(&name))?,
        };
        self.ensure_slug_free(&slug, None).await?;

        let section = self.repo.insert(NewSection { name, slug }).await?;
        info!(section_id = %section.id, slug = %section.slug, "section created");
        Ok(section.into())
    }

    pub async fn update_section(
        &self,
        command: UpdateSectionCommand,
    ) -> ApplicationResult<SectionDto> {
        let id = SectionId::new(command.id)?;
        if !command.partial && command.name.is_none() {
            return Err(ApplicationError::validation("missing required fields: name"));
        }
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("section not found"));
        }

        let name = command
            .name
            .map(|name| required_text("name", name, MAX_SECTION_NAME))
            .transpose()?;
        let slug = command.slug.map(Slug::new).transpose()?;
        if let Some(slug) = &slug {
            self.ensure_slug_free(slug, Some(id)).await?;
        }

        let section = self.repo.update(SectionUpdate { id, name, slug }).await?;
        Ok(section.into())
    }

    pub async fn delete_section(&self, id: i64) -> ApplicationResult<()> {
        let id = SectionId::new(id)?;
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("section not found"));
        }
        self.repo.delete(id).await?;
        info!(section_id = %id, "section deleted");
        Ok(())
    }

    async fn ensure_slug_free(&self, slug: &Slug, owner: Option<SectionId>) -> ApplicationResult<()> {
        match self.repo.find_by_slug(slug).await? {
            Some(existing) if Some(existing.id) != owner => Err(ApplicationError::conflict(
                format!("section slug '{slug}' is already taken"),
            )),
            _ => Ok(()),
        }
    }
}
