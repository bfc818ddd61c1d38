use super::ArticleQueryService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleId,
};

pub struct GetArticleByIdQuery {
    pub id: i64,
}

impl ArticleQueryService {
    pub async fn get_article(&self, query: GetArticleByIdQuery) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(query.id)?;
        self.read_repo
            .find_by_id(id)
            .await?
            .map(ArticleDto::from)
            .ok_or_else(|| ApplicationError::not_found(format!("article {id} not found")))
    }
}
