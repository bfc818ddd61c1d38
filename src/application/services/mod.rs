// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            articles::ArticleCommandService, images::ImageCommandService,
            layout::LayoutCommandService, people::PersonCommandService,
            sections::SectionCommandService, tags::TagCommandService,
        },
        ports::{time::Clock, util::SlugGenerator},
        queries::{
            articles::ArticleQueryService, images::ImageQueryService,
            layout::LayoutQueryService, people::PersonQueryService,
            sections::SectionQueryService, tags::TagQueryService,
        },
    },
    domain::{
        article::{
            ArticleReadRepository, ArticleRevisionRepository, ArticleWriteRepository,
            services::ArticleSlugService,
        },
        image::{ImageAttachmentRepository, ImageRepository},
        layout::{ComponentRegistry, LayoutRepository},
        person::PersonRepository,
        section::SectionRepository,
        tag::TagRepository,
    },
};

/// Storage adapters the services are wired over, one per aggregate.
#[derive(Clone)]
pub struct Repositories {
    pub layout: Arc<dyn LayoutRepository>,
    pub article_write: Arc<dyn ArticleWriteRepository>,
    pub article_read: Arc<dyn ArticleReadRepository>,
    pub article_revisions: Arc<dyn ArticleRevisionRepository>,
    pub sections: Arc<dyn SectionRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub people: Arc<dyn PersonRepository>,
    pub images: Arc<dyn ImageRepository>,
    pub attachments: Arc<dyn ImageAttachmentRepository>,
}

#[derive(Clone)]
pub struct ApplicationServices {
    layout_commands: Arc<LayoutCommandService>,
    layout_queries: Arc<LayoutQueryService>,
    article_commands: Arc<ArticleCommandService>,
    article_queries: Arc<ArticleQueryService>,
    section_commands: Arc<SectionCommandService>,
    section_queries: Arc<SectionQueryService>,
    tag_commands: Arc<TagCommandService>,
    tag_queries: Arc<TagQueryService>,
    person_commands: Arc<PersonCommandService>,
    person_queries: Arc<PersonQueryService>,
    image_commands: Arc<ImageCommandService>,
    image_queries: Arc<ImageQueryService>,
}

impl ApplicationServices {
    pub fn new(
        registry: Arc<ComponentRegistry>,
        repos: Repositories,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        let layout_commands = Arc::new(LayoutCommandService::new(
            Arc::clone(&registry),
            Arc::clone(&repos.layout),
            Arc::clone(&clock),
        ));
        let layout_queries = Arc::new(LayoutQueryService::new(
            registry,
            Arc::clone(&repos.layout),
        ));

        let slug_service = Arc::new(ArticleSlugService::new(
            Arc::clone(&repos.article_read),
            Arc::clone(&slugger),
        ));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&repos.article_write),
            Arc::clone(&repos.article_read),
            Arc::clone(&repos.article_revisions),
            Arc::clone(&repos.sections),
            Arc::clone(&repos.tags),
            Arc::clone(&repos.people),
            slug_service,
            Arc::clone(&clock),
        ));
        let article_queries = Arc::new(ArticleQueryService::new(
            Arc::clone(&repos.article_read),
            Arc::clone(&repos.article_revisions),
            Arc::clone(&repos.sections),
            Arc::clone(&repos.attachments),
        ));

        let section_commands = Arc::new(SectionCommandService::new(
            Arc::clone(&repos.sections),
            Arc::clone(&slugger),
        ));
        let section_queries = Arc::new(SectionQueryService::new(Arc::clone(&repos.sections)));

        let tag_commands = Arc::new(TagCommandService::new(Arc::clone(&repos.tags)));
        let tag_queries = Arc::new(TagQueryService::new(Arc::clone(&repos.tags)));

        let person_commands = Arc::new(PersonCommandService::new(
            Arc::clone(&repos.people),
            Arc::clone(&slugger),
            Arc::clone(&clock),
        ));
        let person_queries = Arc::new(PersonQueryService::new(Arc::clone(&repos.people)));

        let image_commands = Arc::new(ImageCommandService::new(
            Arc::clone(&repos.images),
            Arc::clone(&repos.attachments),
            Arc::clone(&repos.article_read),
            Arc::clone(&repos.people),
            Arc::clone(&clock),
        ));
        let image_queries = Arc::new(ImageQueryService::new(Arc::clone(&repos.images)));

        Self {
            layout_commands,
            layout_queries,
            article_commands,
            article_queries,
            section_commands,
            section_queries,
            tag_commands,
            tag_queries,
            person_commands,
            person_queries,
            image_commands,
            image_queries,
        }
    }

    pub fn layout_commands(&self) -> &LayoutCommandService {
        &self.layout_commands
    }

    pub fn layout_queries(&self) -> &LayoutQueryService {
        &self.layout_queries
    }

    pub fn article_commands(&self) -> &ArticleCommandService {
        &self.article_commands
    }

    pub fn article_queries(&self) -> &ArticleQueryService {
        &self.article_queries
    }

    pub fn section_commands(&self) -> &SectionCommandService {
        &self.section_commands
    }

    pub fn section_queries(&self) -> &SectionQueryService {
        &self.section_queries
    }

    pub fn tag_commands(&self) -> &TagCommandService {
        &self.tag_commands
    }

    pub fn tag_queries(&self) -> &TagQueryService {
        &self.tag_queries
    }

    pub fn person_commands(&self) -> &PersonCommandService {
        &self.person_commands
    }

    pub fn person_queries(&self) -> &PersonQueryService {
        &self.person_queries
    }

    pub fn image_commands(&self) -> &ImageCommandService {
        &self.image_commands
    }

    pub fn image_queries(&self) -> &ImageQueryService {
        &self.image_queries
    }
}
