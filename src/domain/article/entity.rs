use crate::domain::article::value_objects::{ArticleId, ArticleSlug, Headline, Importance};
use crate::domain::common::{ListWindow, PersonId, SectionId, TagId};
use crate::domain::tag::Tag;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub revision_id: i32,
    pub headline: Headline,
    pub short_headline: Option<String>,
    pub slug: ArticleSlug,
    pub snippet: Option<String>,
    pub content: String,
    pub section_id: SectionId,
    pub author_ids: Vec<PersonId>,
    pub tags: Vec<Tag>,
    pub topics: Vec<String>,
    pub importance: Importance,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub headline: Headline,
    pub short_headline: Option<String>,
    pub slug: ArticleSlug,
    pub snippet: Option<String>,
    pub content: String,
    pub section_id: SectionId,
    pub author_ids: Vec<PersonId>,
    pub tag_ids: Vec<TagId>,
    pub topics: Vec<String>,
    pub importance: Importance,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PublishStateUpdate {
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

/// Partial article change. Every update bumps `revision_id`.
#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub headline: Option<Headline>,
    pub short_headline: Option<Option<String>>,
    pub slug: Option<ArticleSlug>,
    pub snippet: Option<Option<String>>,
    pub content: Option<String>,
    pub section_id: Option<SectionId>,
    pub author_ids: Option<Vec<PersonId>>,
    pub tag_ids: Option<Vec<TagId>>,
    pub topics: Option<Vec<String>>,
    pub importance: Option<Importance>,
    pub publish_state: Option<PublishStateUpdate>,
    pub original_revision: i32,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, original_revision: i32, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            headline: None,
            short_headline: None,
            slug: None,
            snippet: None,
            content: None,
            section_id: None,
            author_ids: None,
            tag_ids: None,
            topics: None,
            importance: None,
            publish_state: None,
            original_revision,
            updated_at,
        }
    }

    pub fn with_headline(mut self, headline: Headline, slug: ArticleSlug) -> Self {
        self.headline = Some(headline);
        self.slug = Some(slug);
        self
    }

    pub fn with_publish_state(
        mut self,
        published: bool,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.publish_state = Some(PublishStateUpdate {
            published,
            published_at,
        });
        self
    }

    pub fn next_revision(&self) -> i32 {
        self.original_revision + 1
    }

    /// Apply the change to an in-memory copy of the article.
    pub fn apply_to(&self, article: &mut Article, tags: Option<Vec<Tag>>) {
        if let Some(headline) = &self.headline {
            article.headline = headline.clone();
        }
        if let Some(slug) = &self.slug {
            article.slug = slug.clone();
        }
        if let Some(short_headline) = &self.short_headline {
            article.short_headline = short_headline.clone();
        }
        if let Some(snippet) = &self.snippet {
            article.snippet = snippet.clone();
        }
        if let Some(content) = &self.content {
            article.content = content.clone();
        }
        if let Some(section_id) = self.section_id {
            article.section_id = section_id;
        }
        if let Some(author_ids) = &self.author_ids {
            article.author_ids = author_ids.clone();
        }
        if let Some(tags) = tags {
            article.tags = tags;
        }
        if let Some(topics) = &self.topics {
            article.topics = topics.clone();
        }
        if let Some(importance) = self.importance {
            article.importance = importance;
        }
        if let Some(state) = &self.publish_state {
            article.published = state.published;
            article.published_at = state.published_at;
        }
        article.revision_id = self.next_revision();
        article.updated_at = self.updated_at;
    }
}

/// Listing filters shared by the article index and the frontpage.
#[derive(Debug, Clone)]
pub struct ArticleFilter {
    pub tag: Option<String>,
    pub topic: Option<String>,
    /// Case-insensitive substring of the headline.
    pub search: Option<String>,
    pub section_id: Option<SectionId>,
    pub published_only: bool,
    pub window: ListWindow,
}

impl ArticleFilter {
    pub fn new(window: ListWindow) -> Self {
        Self {
            tag: None,
            topic: None,
            search: None,
            section_id: None,
            published_only: false,
            window,
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        if self.published_only && !article.published {
            return false;
        }
        if let Some(section_id) = self.section_id {
            if article.section_id != section_id {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !article.tags.iter().any(|t| t.name.as_str() == tag) {
                return false;
            }
        }
        if let Some(topic) = &self.topic {
            if !article.topics.iter().any(|t| t == topic) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !article.headline.as_str().to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tag::TagName;

    fn sample_article() -> Article {
        let now = Utc::now();
        Article {
            id: ArticleId::new(1).unwrap(),
            revision_id: 1,
            headline: Headline::new("Council approves budget").unwrap(),
            short_headline: None,
            slug: ArticleSlug::new("council-approves-budget").unwrap(),
            snippet: None,
            content: "body".into(),
            section_id: SectionId::new(1).unwrap(),
            author_ids: vec![PersonId::new(1).unwrap()],
            tags: vec![Tag {
                id: TagId::new(1).unwrap(),
                name: TagName::new("City Hall").unwrap(),
            }],
            topics: vec!["budget".into()],
            importance: Importance::DEFAULT,
            published: false,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn update_bumps_revision() {
        let mut article = sample_article();
        let now = Utc::now();
        let mut update = ArticleUpdate::new(article.id, article.revision_id, now);
        update.content = Some("new body".into());
        update.apply_to(&mut article, None);
        assert_eq!(article.revision_id, 2);
        assert_eq!(article.content, "new body");
        assert_eq!(article.headline.as_str(), "Council approves budget");
    }

    #[test]
    fn filter_matches_tag_topic_and_search() {
        let article = sample_article();
        let mut filter = ArticleFilter::new(ListWindow::new(10, 0));
        assert!(filter.matches(&article));

        filter.tag = Some("City Hall".into());
        filter.topic = Some("budget".into());
        filter.search = Some("APPROVES".into());
        assert!(filter.matches(&article));

        filter.tag = Some("Sports".into());
        assert!(!filter.matches(&article));

        let mut published = ArticleFilter::new(ListWindow::new(10, 0));
        published.published_only = true;
        assert!(!published.matches(&article));
    }
}
