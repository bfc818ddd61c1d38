// src/application/commands/articles/delete.rs
use super::ArticleCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::article::ArticleId,
};
use tracing::info;

pub struct DeleteArticleCommand {
    pub id: i64,
}

impl ArticleCommandService {
    pub async fn delete_article(&self, command: DeleteArticleCommand) -> ApplicationResult<()> {
        let id = ArticleId::new(command.id)?;
        if self.read_repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("article not found"));
        }
        self.write_repo.delete(id).await?;
        info!(article_id = %id, "article deleted");
        Ok(())
    }
}
