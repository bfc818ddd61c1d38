use super::ArticleCommandService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{ArticleId, ArticleRevision, ArticleUpdate, Headline, Importance},
};
use tracing::info;

/// `partial = false` is a full replacement and requires headline, content and section.
pub struct UpdateArticleCommand {
    pub id: i64,
    pub partial: bool,
    pub headline: Option<String>,
    pub short_headline: Option<Option<String>>,
    pub snippet: Option<Option<String>>,
    pub content: Option<String>,
    pub section_id: Option<i64>,
    pub authors: Option<Vec<i64>>,
    pub tags: Option<Vec<i64>>,
    pub topics: Option<Vec<String>>,
    pub importance: Option<i64>,
    pub publish: Option<bool>,
}

impl UpdateArticleCommand {
    pub fn partial(id: i64) -> Self {
        Self {
            id,
            partial: true,
            headline: None,
            short_headline: None,
            snippet: None,
            content: None,
            section_id: None,
            authors: None,
            tags: None,
            topics: None,
            importance: None,
            publish: None,
        }
    }

    fn ensure_complete(&self) -> ApplicationResult<()> {
        if self.partial {
            return Ok(());
        }
        let missing: Vec<&str> = [
            ("long_headline", self.headline.is_none()),
            ("content", self.content.is_none()),
            ("section_id", self.section_id.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

impl ArticleCommandService {
    pub async fn update_article(
        &self,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        command.ensure_complete()?;
        let id = ArticleId::new(command.id)?;
        let article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let now = self.clock.now();
        let mut update = ArticleUpdate::new(id, article.revision_id, now);

        if let Some(headline) = command.headline {
            let headline = Headline::new(headline)?;
            if headline != article.headline {
                let slug = self
                    .slug_service
                    .unique_slug(&headline, Some(id), now)
                    .await?;
                update = update.with_headline(headline, slug);
            }
        }
        if let Some(section_id) = command.section_id {
            update.section_id = Some(self.ensure_section(section_id).await?);
        }
        if let Some(authors) = command.authors {
            update.author_ids = Some(self.ensure_authors(&authors).await?);
        }
        if let Some(tags) = command.tags {
            update.tag_ids = Some(self.ensure_tags(&tags).await?);
        }
        if let Some(importance) = command.importance {
            update.importance = Some(Importance::new(importance)?);
        }
        match command.publish {
            Some(true) if !article.published => {
                update = update.with_publish_state(true, Some(now));
            }
            Some(false) if article.published => {
                update = update.with_publish_state(false, None);
            }
            _ => {}
        }
        update.short_headline = command.short_headline;
        update.snippet = command.snippet;
        update.content = command.content;
        update.topics = command.topics;

        let updated = self.write_repo.update(update).await?;
        self.revision_repo
            .append(ArticleRevision::snapshot(&updated, now))
            .await?;
        info!(
            article_id = %updated.id,
            revision_id = updated.revision_id,
            "article updated"
        );
        Ok(updated.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_update_requires_core_fields() {
        let mut command = UpdateArticleCommand::partial(1);
        assert!(command.ensure_complete().is_ok());

        command.partial = false;
        command.content = Some("body".into());
        let err = command.ensure_complete().unwrap_err();
        assert!(
            matches!(err, ApplicationError::Validation(msg) if msg == "missing required fields: long_headline, section_id")
        );
    }
}
