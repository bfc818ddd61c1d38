//! Process-local storage backend.
//!
//! Every table lives behind one async mutex. Layout units of work hold the
//! lock for their whole lifetime and write through a working copy, so an
//! abandoned unit of work leaves the tables untouched.

mod article;
mod catalog;
mod image;
mod layout;

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::application::services::Repositories;
use crate::domain::article::{Article, ArticleRevision};
use crate::domain::common::{ImageId, TagId};
use crate::domain::image::Image;
use crate::domain::layout::{Page, Placement};
use crate::domain::person::Person;
use crate::domain::section::Section;
use crate::domain::tag::Tag;

pub use article::{
    InMemoryArticleReadRepository, InMemoryArticleRevisionRepository,
    InMemoryArticleWriteRepository,
};
pub use catalog::{InMemoryPersonRepository, InMemorySectionRepository, InMemoryTagRepository};
pub use image::{InMemoryImageAttachmentRepository, InMemoryImageRepository};
pub use layout::{InMemoryLayoutRepository, InMemoryLayoutUnitOfWork};

#[derive(Debug, Clone, Default)]
pub(crate) struct Sequence(i64);

impl Sequence {
    pub(crate) fn next(&mut self) -> i64 {
        self.0 += 1;
        self.0
    }
}

/// Article row; tags are stored by id and resolved on read.
#[derive(Debug, Clone)]
pub(crate) struct ArticleRecord {
    pub(crate) article: Article,
    pub(crate) tag_ids: Vec<TagId>,
}

#[derive(Debug, Clone)]
pub(crate) struct AttachmentRecord {
    pub(crate) id: i64,
    pub(crate) article_id: i64,
    pub(crate) image_id: ImageId,
    pub(crate) caption: Option<String>,
    pub(crate) credit: Option<String>,
    pub(crate) position: i32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Tables {
    pub(crate) sections: BTreeMap<i64, Section>,
    pub(crate) tags: BTreeMap<i64, Tag>,
    pub(crate) people: BTreeMap<i64, Person>,
    pub(crate) articles: BTreeMap<i64, ArticleRecord>,
    pub(crate) revisions: Vec<ArticleRevision>,
    pub(crate) images: BTreeMap<i64, Image>,
    pub(crate) attachments: BTreeMap<i64, AttachmentRecord>,
    /// Pages keyed by id; `placements` is kept empty here.
    pub(crate) pages: BTreeMap<i64, Page>,
    pub(crate) placements: BTreeMap<i64, Placement>,
    pub(crate) section_ids: Sequence,
    pub(crate) tag_ids: Sequence,
    pub(crate) person_ids: Sequence,
    pub(crate) article_ids: Sequence,
    pub(crate) image_ids: Sequence,
    pub(crate) attachment_ids: Sequence,
    pub(crate) page_ids: Sequence,
    pub(crate) placement_ids: Sequence,
}

impl Tables {
    pub(crate) fn hydrate_article(&self, record: &ArticleRecord) -> Article {
        let mut article = record.article.clone();
        let mut tags: Vec<Tag> = record
            .tag_ids
            .iter()
            .filter_map(|id| self.tags.get(&i64::from(*id)).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()).then(a.id.cmp(&b.id)));
        article.tags = tags;
        article
    }
}

/// Shared handle to the in-memory tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn tables(&self) -> &Arc<Mutex<Tables>> {
        &self.tables
    }

    /// Every repository, all sharing this store.
    pub fn repositories(&self) -> Repositories {
        Repositories {
            layout: Arc::new(InMemoryLayoutRepository::new(self.clone())),
            article_write: Arc::new(InMemoryArticleWriteRepository::new(self.clone())),
            article_read: Arc::new(InMemoryArticleReadRepository::new(self.clone())),
            article_revisions: Arc::new(InMemoryArticleRevisionRepository::new(self.clone())),
            sections: Arc::new(InMemorySectionRepository::new(self.clone())),
            tags: Arc::new(InMemoryTagRepository::new(self.clone())),
            people: Arc::new(InMemoryPersonRepository::new(self.clone())),
            images: Arc::new(InMemoryImageRepository::new(self.clone())),
            attachments: Arc::new(InMemoryImageAttachmentRepository::new(self.clone())),
        }
    }
}

/// Apply an offset window to an already ordered iterator.
pub(crate) fn window<T>(
    items: impl IntoIterator<Item = T>,
    window: crate::domain::common::ListWindow,
) -> Vec<T> {
    items
        .into_iter()
        .skip(window.offset as usize)
        .take(window.limit as usize)
        .collect()
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
