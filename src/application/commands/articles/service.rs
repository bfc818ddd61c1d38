// src/application/commands/articles/service.rs
use std::sync::Arc;

use crate::{
    application::ports::time::Clock,
    domain::{
        article::{
            ArticleReadRepository, ArticleRevisionRepository, ArticleWriteRepository,
            services::ArticleSlugService,
        },
        person::PersonRepository,
        section::SectionRepository,
        tag::TagRepository,
    },
};

pub struct ArticleCommandService {
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) revision_repo: Arc<dyn ArticleRevisionRepository>,
    pub(super) section_repo: Arc<dyn SectionRepository>,
    pub(super) tag_repo: Arc<dyn TagRepository>,
    pub(super) person_repo: Arc<dyn PersonRepository>,
    pub(super) slug_service: Arc<ArticleSlugService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        revision_repo: Arc<dyn ArticleRevisionRepository>,
        section_repo: Arc<dyn SectionRepository>,
        tag_repo: Arc<dyn TagRepository>,
        person_repo: Arc<dyn PersonRepository>,
        slug_service: Arc<ArticleSlugService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            revision_repo,
            section_repo,
            tag_repo,
            person_repo,
            slug_service,
            clock,
        }
    }
}
