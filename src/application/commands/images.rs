use std::sync::Arc;

use crate::{
    application::{
        dto::{ImageAttachmentDto, ImageDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        article::{ArticleId, ArticleReadRepository},
        common::{ImageId, PersonId, required_text},
        image::{
            ImageAttachmentRepository, ImageRepository, ImageUpdate, NewImage,
            NewImageAttachment,
        },
        person::PersonRepository,
    },
};
use tracing::info;

const MAX_FILENAME: usize = 255;

pub struct CreateImageCommand {
    pub title: Option<String>,
    pub filename: String,
    pub caption: Option<String>,
    /// Defaults to the requesting person when omitted.
    pub authors: Option<Vec<i64>>,
}

pub struct UpdateImageCommand {
    pub id: i64,
    pub partial: bool,
    pub title: Option<Option<String>>,
    pub filename: Option<String>,
    pub caption: Option<Option<String>>,
    pub authors: Option<Vec<i64>>,
}

pub struct AttachImageCommand {
    pub article_id: i64,
    pub image_id: i64,
    pub caption: Option<String>,
    pub credit: Option<String>,
}

pub struct ImageCommandService {
    repo: Arc<dyn ImageRepository>,
    attachment_repo: Arc<dyn ImageAttachmentRepository>,
    article_repo: Arc<dyn ArticleReadRepository>,
    person_repo: Arc<dyn PersonRepository>,
    clock: Arc<dyn Clock>,
}

impl ImageCommandService {
    pub fn new(
        repo: Arc<dyn ImageRepository>,
        attachment_repo: Arc<dyn ImageAttachmentRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
        person_repo: Arc<dyn PersonRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            attachment_repo,
            article_repo,
            person_repo,
            clock,
        }
    }

    pub async fn create_image(
        &self,
        requester: Option<i64>,
        command: CreateImageCommand,
    ) -> ApplicationResult<ImageDto> {
        let filename = required_text("filename", command.filename, MAX_FILENAME)?;
        let requested = match command.authors {
            Some(authors) => authors,
            None => requester.into_iter().collect(),
        };
        let authors = self.ensure_people(&requested).await?;

        let mut image = self
            .repo
            .insert(NewImage {
                title: command.title,
                filename,
                caption: command.caption,
                created_at: self.clock.now(),
            })
            .await?;
        self.repo.save_authors(image.id, &authors).await?;
        image.authors = authors;

        info!(image_id = %image.id, authors = image.authors.len(), "image created");
        Ok(image.into())
    }

    pub async fn update_image(&self, command: UpdateImageCommand) -> ApplicationResult<ImageDto> {
        let id = ImageId::new(command.id)?;
        if !command.partial && command.filename.is_none() {
            return Err(ApplicationError::validation(
                "missing required fields: filename",
            ));
        }
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("image not found"));
        }
        let filename = command
            .filename
            .map(|name| required_text("filename", name, MAX_FILENAME))
            .transpose()?;
        let authors = match command.authors {
            Some(authors) => Some(self.ensure_people(&authors).await?),
            None => None,
        };

        let mut image = self
            .repo
            .update(ImageUpdate {
                id,
                title: command.title,
                filename,
                caption: command.caption,
                updated_at: self.clock.now(),
            })
            .await?;
        if let Some(authors) = authors {
            self.repo.save_authors(id, &authors).await?;
            image.authors = authors;
        }
        Ok(image.into())
    }

    pub async fn delete_image(&self, id: i64) -> ApplicationResult<()> {
        let id = ImageId::new(id)?;
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("image not found"));
        }
        self.repo.delete(id).await?;
        Ok(())
    }

    /// Place an existing image at the end of an article's attachment list.
    pub async fn attach_image(
        &self,
        command: AttachImageCommand,
    ) -> ApplicationResult<ImageAttachmentDto> {
        let article_id = ArticleId::new(command.article_id)?;
        let image_id = ImageId::new(command.image_id)?;
        if self.article_repo.find_by_id(article_id).await?.is_none() {
            return Err(ApplicationError::not_found("article not found"));
        }
        if self.repo.find_by_id(image_id).await?.is_none() {
            return Err(ApplicationError::validation(format!(
                "image {image_id} does not exist"
            )));
        }
        let attachment = self
            .attachment_repo
            .insert(NewImageAttachment {
                article_id,
                image_id,
                caption: command.caption,
                credit: command.credit,
            })
            .await?;
        info!(article_id = %article_id, image_id = %image_id, "image attached");
        Ok(attachment.into())
    }

    async fn ensure_people(&self, ids: &[i64]) -> ApplicationResult<Vec<PersonId>> {
        let mut people = Vec::with_capacity(ids.len());
        for raw in ids {
            let id = PersonId::new(*raw)?;
            if self.person_repo.find_by_id(id).await?.is_none() {
                return Err(ApplicationError::validation(format!(
                    "person {id} does not exist"
                )));
            }
            if !people.contains(&id) {
                people.push(id);
            }
        }
        Ok(people)
    }
}
