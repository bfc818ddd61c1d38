use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ImageAttachmentDto, PageRequest, ResourcePage},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleId,
};

pub const ATTACHMENT_PAGE_SIZE: u32 = 50;

#[derive(Debug, Default)]
pub struct ListAttachmentsQuery {
    /// Restrict to one article; every attachment otherwise.
    pub article_id: Option<i64>,
    pub page: PageRequest,
}

impl ArticleQueryService {
    pub async fn list_attachments(
        &self,
        query: ListAttachmentsQuery,
    ) -> ApplicationResult<ResourcePage<ImageAttachmentDto>> {
        let article_id = match query.article_id {
            Some(id) => {
                let id = ArticleId::new(id)?;
                if self.read_repo.find_by_id(id).await?.is_none() {
                    return Err(ApplicationError::not_found("article not found"));
                }
                Some(id)
            }
            None => None,
        };

        let window = query.page.window(ATTACHMENT_PAGE_SIZE);
        let rows = self
            .attachment_repo
            .list(article_id, window.probe())
            .await?;
        Ok(ResourcePage::from_probe(rows, window.limit, window.offset)
            .map(ImageAttachmentDto::from))
    }
}
