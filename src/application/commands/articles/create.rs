// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{ArticleRevision, ArticleSlug, Headline, Importance, NewArticle},
};
use tracing::info;

pub struct CreateArticleCommand {
    pub headline: String,
    pub short_headline: Option<String>,
    /// Generated from the headline when absent.
    pub slug: Option<String>,
    pub snippet: Option<String>,
    pub content: String,
    pub section_id: i64,
    pub authors: Vec<i64>,
    pub tags: Vec<i64>,
    pub topics: Vec<String>,
    pub importance: Option<i64>,
    pub publish: bool,
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let headline = Headline::new(command.headline)?;
        let importance = command
            .importance
            .map(Importance::new)
            .transpose()?
            .unwrap_or_default();
        let section_id = self.ensure_section(command.section_id).await?;
        let author_ids = self.ensure_authors(&command.authors).await?;
        let tag_ids = self.ensure_tags(&command.tags).await?;
        let now = self.clock.now();

        let slug = match command.slug {
            Some(slug) => {
                let slug = ArticleSlug::new(slug)?;
                if self.read_repo.find_by_slug(&slug).await?.is_some() {
                    return Err(ApplicationError::conflict(format!(
                        "article slug '{slug}' is already taken"
                    )));
                }
                slug
            }
            None => self.slug_service.unique_slug(&headline, None, now).await?,
        };

        let new_article = NewArticle {
            headline,
            short_headline: command.short_headline,
            slug,
            snippet: command.snippet,
            content: command.content,
            section_id,
            author_ids,
            tag_ids,
            topics: command.topics,
            importance,
            published: command.publish,
            published_at: command.publish.then_some(now),
            created_at: now,
            updated_at: now,
        };

        let created = self.write_repo.insert(new_article).await?;
        self.revision_repo
            .append(ArticleRevision::snapshot(&created, now))
            .await?;
        info!(article_id = %created.id, slug = %created.slug, "article created");
        Ok(created.into())
    }
}
