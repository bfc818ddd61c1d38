// src/domain/person.rs
use crate::domain::common::{ListWindow, PersonId, Slug};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Person {
    pub id: PersonId,
    pub full_name: String,
    pub slug: Slug,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPerson {
    pub full_name: String,
    pub slug: Slug,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PersonUpdate {
    pub id: PersonId,
    pub full_name: Option<String>,
    pub slug: Option<Slug>,
    pub description: Option<Option<String>>,
}

#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn insert(&self, person: NewPerson) -> DomainResult<Person>;
    async fn update(&self, update: PersonUpdate) -> DomainResult<Person>;
    async fn delete(&self, id: PersonId) -> DomainResult<()>;
    async fn find_by_id(&self, id: PersonId) -> DomainResult<Option<Person>>;
    /// People whose full name contains `search`, case-insensitively.
    async fn list(&self, search: Option<&str>, window: ListWindow) -> DomainResult<Vec<Person>>;
}
