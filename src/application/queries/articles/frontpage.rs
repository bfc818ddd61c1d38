use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, PageRequest, ResourcePage, pagination::DEFAULT_LIMIT},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::ArticleFilter,
        common::{SectionId, Slug},
    },
};
use tracing::debug;

/// Published articles, newest first, optionally narrowed to one section.
#[derive(Debug, Default)]
pub struct FrontpageQuery {
    pub section_id: Option<i64>,
    pub section_slug: Option<String>,
    pub page: PageRequest,
}

impl ArticleQueryService {
    pub async fn frontpage(
        &self,
        query: FrontpageQuery,
    ) -> ApplicationResult<ResourcePage<ArticleDto>> {
        let section = match (query.section_id, query.section_slug) {
            (Some(_), Some(_)) => {
                return Err(ApplicationError::validation(
                    "filter by section_id or section_slug, not both",
                ));
            }
            (Some(id), None) => Some(
                self.section_repo
                    .find_by_id(SectionId::new(id)?)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("section not found"))?,
            ),
            (None, Some(slug)) => Some(
                self.section_repo
                    .find_by_slug(&Slug::new(slug)?)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("section not found"))?,
            ),
            (None, None) => None,
        };

        let window = query.page.window(DEFAULT_LIMIT);
        let mut filter = ArticleFilter::new(window.probe());
        filter.published_only = true;
        filter.section_id = section.as_ref().map(|section| section.id);
        if let Some(section) = &section {
            debug!(section = %section.slug, "frontpage filtered by section");
        }

        let rows = self.read_repo.list(&filter).await?;
        Ok(ResourcePage::from_probe(rows, window.limit, window.offset).map(ArticleDto::from))
    }
}
