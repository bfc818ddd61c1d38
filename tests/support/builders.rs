// tests/support/builders.rs
use super::helpers::post;
use axum::Router;
use axum::http::StatusCode;
use serde_json::{Value, json};

/// JSON payload for `POST /api/v1/articles`.
pub struct ArticleBuilder {
    headline: String,
    section_id: i64,
    authors: Vec<i64>,
    tags: Vec<i64>,
    topics: Vec<String>,
    published: bool,
    slug: Option<String>,
}

impl ArticleBuilder {
    pub fn new(section_id: i64) -> Self {
        Self {
            headline: "Council approves budget".into(),
            section_id,
            authors: Vec::new(),
            tags: Vec::new(),
            topics: Vec::new(),
            published: false,
            slug: None,
        }
    }

    pub fn headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = headline.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn author(mut self, id: i64) -> Self {
        self.authors.push(id);
        self
    }

    pub fn tag(mut self, id: i64) -> Self {
        self.tags.push(id);
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topics.push(topic.into());
        self
    }

    pub fn published(mut self) -> Self {
        self.published = true;
        self
    }

    pub fn build(self) -> Value {
        let mut body = json!({
            "long_headline": self.headline,
            "content": "<p>Body copy</p>",
            "section_id": self.section_id,
            "authors": self.authors,
            "tags": self.tags,
            "topics": self.topics,
            "is_published": self.published,
        });
        if let Some(slug) = self.slug {
            body["slug"] = json!(slug);
        }
        body
    }
}

fn created_id(status: StatusCode, body: &Value, what: &str) -> i64 {
    assert_eq!(status, StatusCode::CREATED, "creating {what} failed: {body}");
    body["id"].as_i64().expect("id in response")
}

pub async fn seed_section(app: &Router, name: &str) -> i64 {
    let (status, body) = post(app, "/api/v1/sections", json!({ "name": name })).await;
    created_id(status, &body, "section")
}

pub async fn seed_person(app: &Router, full_name: &str) -> i64 {
    let (status, body) = post(app, "/api/v1/people", json!({ "full_name": full_name })).await;
    created_id(status, &body, "person")
}

pub async fn seed_tag(app: &Router, name: &str) -> i64 {
    let (status, body) = post(app, "/api/v1/tags", json!({ "name": name })).await;
    created_id(status, &body, "tag")
}

pub async fn seed_article(app: &Router, article: ArticleBuilder) -> i64 {
    let (status, body) = post(app, "/api/v1/articles", article.build()).await;
    created_id(status, &body, "article")
}

pub async fn seed_image(app: &Router, filename: &str) -> i64 {
    let (status, body) = post(app, "/api/v1/images", json!({ "filename": filename })).await;
    created_id(status, &body, "image")
}
