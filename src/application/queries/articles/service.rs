use std::sync::Arc;

use crate::domain::{
    article::{ArticleReadRepository, ArticleRevisionRepository},
    image::ImageAttachmentRepository,
    section::SectionRepository,
};

pub struct ArticleQueryService {
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) revision_repo: Arc<dyn ArticleRevisionRepository>,
    pub(super) section_repo: Arc<dyn SectionRepository>,
    pub(super) attachment_repo: Arc<dyn ImageAttachmentRepository>,
}

impl ArticleQueryService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        revision_repo: Arc<dyn ArticleRevisionRepository>,
        section_repo: Arc<dyn SectionRepository>,
        attachment_repo: Arc<dyn ImageAttachmentRepository>,
    ) -> Self {
        Self {
            read_repo,
            revision_repo,
            section_repo,
            attachment_repo,
        }
    }
}
