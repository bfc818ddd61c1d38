mod article;
mod image;
mod layout;
mod person;
mod revision;
mod section;
mod tag;

pub use article::{PostgresArticleReadRepository, PostgresArticleWriteRepository};
pub use image::{PostgresImageAttachmentRepository, PostgresImageRepository};
pub use layout::{PostgresLayoutRepository, PostgresLayoutUnitOfWork};
pub use person::PostgresPersonRepository;
pub use revision::PostgresArticleRevisionRepository;
pub use section::PostgresSectionRepository;
pub use tag::PostgresTagRepository;

use crate::application::services::Repositories;
use sqlx::PgPool;
use std::sync::Arc;

/// Every repository over one connection pool.
pub fn repositories(pool: &PgPool) -> Repositories {
    Repositories {
        layout: Arc::new(PostgresLayoutRepository::new(pool.clone())),
        article_write: Arc::new(PostgresArticleWriteRepository::new(pool.clone())),
        article_read: Arc::new(PostgresArticleReadRepository::new(pool.clone())),
        article_revisions: Arc::new(PostgresArticleRevisionRepository::new(pool.clone())),
        sections: Arc::new(PostgresSectionRepository::new(pool.clone())),
        tags: Arc::new(PostgresTagRepository::new(pool.clone())),
        people: Arc::new(PostgresPersonRepository::new(pool.clone())),
        images: Arc::new(PostgresImageRepository::new(pool.clone())),
        attachments: Arc::new(PostgresImageAttachmentRepository::new(pool.clone())),
    }
}
