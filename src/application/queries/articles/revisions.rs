use super::ArticleQueryService;
use crate::{
    application::{
        dto::ArticleRevisionDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleId,
};

pub struct GetArticleRevisionQuery {
    pub article_id: i64,
    pub revision_id: i32,
}

impl ArticleQueryService {
    pub async fn get_revision(
        &self,
        query: GetArticleRevisionQuery,
    ) -> ApplicationResult<ArticleRevisionDto> {
        let article_id = ArticleId::new(query.article_id)?;
        if self.read_repo.find_by_id(article_id).await?.is_none() {
            return Err(ApplicationError::not_found("article not found"));
        }

        let revision = self
            .revision_repo
            .find(article_id, query.revision_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!(
                    "revision {} of article {article_id} not found",
                    query.revision_id
                ))
            })?;
        Ok(revision.into())
    }

    pub async fn list_revisions(&self, article_id: i64) -> ApplicationResult<Vec<ArticleRevisionDto>> {
        let article_id = ArticleId::new(article_id)?;
        if self.read_repo.find_by_id(article_id).await?.is_none() {
            return Err(ApplicationError::not_found("article not found"));
        }
        let revisions = self.revision_repo.list_by_article(article_id).await?;
        Ok(revisions.into_iter().map(Into::into).collect())
    }
}
