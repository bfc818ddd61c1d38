use super::{ArticleRecord, InMemoryStore, Tables, window};
use crate::domain::article::{
    Article, ArticleFilter, ArticleId, ArticleReadRepository, ArticleRevision,
    ArticleRevisionRepository, ArticleSlug, ArticleUpdate, ArticleWriteRepository, NewArticle,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use std::cmp::Ordering;

#[derive(Clone)]
pub struct InMemoryArticleWriteRepository {
    store: InMemoryStore,
}

impl InMemoryArticleWriteRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[derive(Clone)]
pub struct InMemoryArticleReadRepository {
    store: InMemoryStore,
}

impl InMemoryArticleReadRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[derive(Clone)]
pub struct InMemoryArticleRevisionRepository {
    store: InMemoryStore,
}

impl InMemoryArticleRevisionRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn slug_taken(tables: &Tables, slug: &ArticleSlug, except: Option<i64>) -> bool {
    tables
        .articles
        .iter()
        .any(|(id, record)| Some(*id) != except && &record.article.slug == slug)
}

fn ensure_section(tables: &Tables, section_id: i64) -> DomainResult<()> {
    if tables.sections.contains_key(&section_id) {
        Ok(())
    } else {
        Err(DomainError::NotFound("referenced record not found".into()))
    }
}

/// Newest publication first, unpublished articles last, then by id descending.
fn newest_first(a: &Article, b: &Article) -> Ordering {
    let by_date = match (a.published_at, b.published_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| b.id.cmp(&a.id))
}

#[async_trait]
impl ArticleWriteRepository for InMemoryArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut tables = self.store.tables().lock().await;
        if slug_taken(&tables, &article.slug, None) {
            return Err(DomainError::Conflict("slug already exists".into()));
        }
        ensure_section(&tables, i64::from(article.section_id))?;

        let id = tables.article_ids.next();
        let record = ArticleRecord {
            article: Article {
                id: ArticleId::new(id)?,
                revision_id: 1,
                headline: article.headline,
                short_headline: article.short_headline,
                slug: article.slug,
                snippet: article.snippet,
                content: article.content,
                section_id: article.section_id,
                author_ids: article.author_ids,
                tags: Vec::new(),
                topics: article.topics,
                importance: article.importance,
                published: article.published,
                published_at: article.published_at,
                created_at: article.created_at,
                updated_at: article.updated_at,
            },
            tag_ids: article.tag_ids,
        };
        let hydrated = tables.hydrate_article(&record);
        tables.articles.insert(id, record);
        Ok(hydrated)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut tables = self.store.tables().lock().await;
        let id = i64::from(update.id);
        let Some(current) = tables.articles.get(&id) else {
            return Err(DomainError::NotFound("article not found".into()));
        };
        if current.article.revision_id != update.original_revision {
            return Err(DomainError::Conflict(
                "article was modified concurrently, please retry".into(),
            ));
        }
        if let Some(slug) = &update.slug {
            if slug_taken(&tables, slug, Some(id)) {
                return Err(DomainError::Conflict("slug already exists".into()));
            }
        }
        if let Some(section_id) = update.section_id {
            ensure_section(&tables, i64::from(section_id))?;
        }

        let mut record = current.clone();
        update.apply_to(&mut record.article, None);
        if let Some(tag_ids) = &update.tag_ids {
            record.tag_ids = tag_ids.clone();
        }
        let hydrated = tables.hydrate_article(&record);
        tables.articles.insert(id, record);
        Ok(hydrated)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut tables = self.store.tables().lock().await;
        let id = i64::from(id);
        if tables.articles.remove(&id).is_none() {
            return Err(DomainError::NotFound("article not found".into()));
        }
        tables
            .revisions
            .retain(|revision| i64::from(revision.article_id) != id);
        tables
            .attachments
            .retain(|_, attachment| attachment.article_id != id);
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let tables = self.store.tables().lock().await;
        Ok(tables
            .articles
            .get(&i64::from(id))
            .map(|record| tables.hydrate_article(record)))
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        let tables = self.store.tables().lock().await;
        Ok(tables
            .articles
            .values()
            .find(|record| &record.article.slug == slug)
            .map(|record| tables.hydrate_article(record)))
    }

    async fn list(&self, filter: &ArticleFilter) -> DomainResult<Vec<Article>> {
        let tables = self.store.tables().lock().await;
        let mut matching: Vec<Article> = tables
            .articles
            .values()
            .map(|record| tables.hydrate_article(record))
            .filter(|article| filter.matches(article))
            .collect();
        matching.sort_by(newest_first);
        Ok(window(matching, filter.window))
    }
}

#[async_trait]
impl ArticleRevisionRepository for InMemoryArticleRevisionRepository {
    async fn append(&self, revision: ArticleRevision) -> DomainResult<()> {
        let mut tables = self.store.tables().lock().await;
        let exists = tables.revisions.iter().any(|stored| {
            stored.article_id == revision.article_id && stored.revision_id == revision.revision_id
        });
        if !exists {
            tables.revisions.push(revision);
        }
        Ok(())
    }

    async fn find(
        &self,
        article_id: ArticleId,
        revision_id: i32,
    ) -> DomainResult<Option<ArticleRevision>> {
        let tables = self.store.tables().lock().await;
        Ok(tables
            .revisions
            .iter()
            .find(|stored| stored.article_id == article_id && stored.revision_id == revision_id)
            .cloned())
    }

    async fn list_by_article(&self, article_id: ArticleId) -> DomainResult<Vec<ArticleRevision>> {
        let tables = self.store.tables().lock().await;
        let mut revisions: Vec<ArticleRevision> = tables
            .revisions
            .iter()
            .filter(|stored| stored.article_id == article_id)
            .cloned()
            .collect();
        revisions.sort_by(|a, b| b.revision_id.cmp(&a.revision_id));
        Ok(revisions)
    }
}
