// src/domain/article/services/mod.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::util::SlugGenerator;
use crate::domain::article::repository::ArticleReadRepository;
use crate::domain::article::value_objects::{ArticleId, ArticleSlug, Headline};
use crate::domain::errors::DomainResult;

/// Produces article slugs from headlines, suffixing `-2`, `-3`, ... on collision.
pub struct ArticleSlugService {
    read_repo: Arc<dyn ArticleReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl ArticleSlugService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        generator: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    pub async fn unique_slug(
        &self,
        headline: &Headline,
        ignore_id: Option<ArticleId>,
        now: DateTime<Utc>,
    ) -> DomainResult<ArticleSlug> {
        let base = self.generator.slugify(headline.as_str());
        let base = if base.is_empty() {
            format!("article-{}", now.timestamp())
        } else {
            base
        };

        let mut candidate = base.clone();
        let mut counter = 2u64;

        loop {
            let slug = ArticleSlug::new(candidate.clone())?;
            match self.read_repo.find_by_slug(&slug).await? {
                Some(existing) if Some(existing.id) == ignore_id => return Ok(slug),
                Some(_) => {
                    candidate = format!("{base}-{counter}");
                    counter += 1;
                }
                None => return Ok(slug),
            }
        }
    }
}
