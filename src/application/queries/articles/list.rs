use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, PageRequest, ResourcePage, pagination::DEFAULT_LIMIT},
        error::ApplicationResult,
    },
    domain::article::ArticleFilter,
};

#[derive(Debug, Default)]
pub struct ListArticlesQuery {
    /// Substring of the long headline.
    pub q: Option<String>,
    pub tag: Option<String>,
    pub topic: Option<String>,
    pub page: PageRequest,
}

impl ArticleQueryService {
    pub async fn list_articles(
        &self,
        query: ListArticlesQuery,
    ) -> ApplicationResult<ResourcePage<ArticleDto>> {
        let window = query.page.window(DEFAULT_LIMIT);
        let mut filter = ArticleFilter::new(window.probe());
        filter.search = non_blank(query.q);
        filter.tag = non_blank(query.tag);
        filter.topic = non_blank(query.topic);

        let rows = self.read_repo.list(&filter).await?;
        Ok(ResourcePage::from_probe(rows, window.limit, window.offset).map(ArticleDto::from))
    }
}

pub(super) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
