use std::sync::Arc;

use crate::{
    application::{
        dto::PersonDto,
        error::{ApplicationError, ApplicationResult},
        ports::{time::Clock, util::SlugGenerator},
    },
    domain::{
        common::{PersonId, Slug, required_text},
        person::{NewPerson, PersonRepository, PersonUpdate},
    },
};
use tracing::info;

const MAX_FULL_NAME: usize = 255;

pub struct CreatePersonCommand {
    pub full_name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

pub struct UpdatePersonCommand {
    pub id: i64,
    pub partial: bool,
    pub full_name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<Option<String>>,
}

pub struct PersonCommandService {
    repo: Arc<dyn PersonRepository>,
    slugger: Arc<dyn SlugGenerator>,
    clock: Arc<dyn Clock>,
}

impl PersonCommandService {
    pub fn new(
        repo: Arc<dyn PersonRepository>,
        slugger: Arc<dyn SlugGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            slugger,
            clock,
        }
    }

    pub async fn create_person(
        &self,
        command: CreatePersonCommand,
    ) -> ApplicationResult<PersonDto> {
        let full_name = required_text("full_name", command.full_name, MAX_FULL_NAME)?;
        let slug = match command.slug {
            Some(slug) => Slug::new(slug)?,
            None => Slug::new(self.slugger.slugify(&full_name))?,
        };
        let person = self
            .repo
            .insert(NewPerson {
                full_name,
                slug,
                description: command.description,
                created_at: self.clock.now(),
            })
            .await?;
        info!(person_id = %person.id, "person created");
        Ok(person.into())
    }

    pub async fn update_person(
        &self,
        command: UpdatePersonCommand,
    ) -> ApplicationResult<PersonDto> {
        let id = PersonId::new(command.id)?;
        if !command.partial && command.full_name.is_none() {
            return Err(ApplicationError::validation(
                "missing required fields: full_name",
            ));
        }
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("person not found"));
        }
        let full_name = command
            .full_name
            .map(|name| required_text("full_name", name, MAX_FULL_NAME))
            .transpose()?;
        let slug = command.slug.map(Slug::new).transpose()?;

        let person = self
            .repo
            .update(PersonUpdate {
                id,
                full_name,
                slug,
                description: command.description,
            })
            .await?;
        Ok(person.into())
    }

    pub async fn delete_person(&self, id: i64) -> ApplicationResult<()> {
        let id = PersonId::new(id)?;
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("person not found"));
        }
        self.repo.delete(id).await?;
        Ok(())
    }
}
