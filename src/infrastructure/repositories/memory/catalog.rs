use super::{InMemoryStore, contains_ignore_case, window};
use crate::domain::common::{ListWindow, PersonId, SectionId, Slug, TagId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::person::{NewPerson, Person, PersonRepository, PersonUpdate};
use crate::domain::section::{NewSection, Section, SectionRepository, SectionUpdate};
use crate::domain::tag::{Tag, TagName, TagRepository};
use async_trait::async_trait;

#[derive(Clone)]
pub struct InMemorySectionRepository {
    store: InMemoryStore,
}

impl InMemorySectionRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SectionRepository for InMemorySectionRepository {
    async fn insert(&self, section: NewSection) -> DomainResult<Section> {
        let mut tables = self.store.tables().lock().await;
        if tables.sections.values().any(|s| s.slug == section.slug) {
            return Err(DomainError::Conflict("section slug already exists".into()));
        }
        let id = tables.section_ids.next();
        let stored = Section {
            id: SectionId::new(id)?,
            name: section.name,
            slug: section.slug,
        };
        tables.sections.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: SectionUpdate) -> DomainResult<Section> {
        let mut tables = self.store.tables().lock().await;
        let id = i64::from(update.id);
        if let Some(slug) = &update.slug {
            if tables
                .sections
                .values()
                .any(|s| &s.slug == slug && s.id != update.id)
            {
                return Err(DomainError::Conflict("section slug already exists".into()));
            }
        }
        let stored = tables
            .sections
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound("section not found".into()))?;
        if let Some(name) = update.name {
            stored.name = name;
        }
        if let Some(slug) = update.slug {
            stored.slug = slug;
        }
        Ok(stored.clone())
    }

    async fn delete(&self, id: SectionId) -> DomainResult<()> {
        let mut tables = self.store.tables().lock().await;
        if tables
            .articles
            .values()
            .any(|record| record.article.section_id == id)
        {
            return Err(DomainError::Conflict(
                "section is referenced by articles".into(),
            ));
        }
        tables
            .sections
            .remove(&i64::from(id))
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("section not found".into()))
    }

    async fn find_by_id(&self, id: SectionId) -> DomainResult<Option<Section>> {
        let tables = self.store.tables().lock().await;
        Ok(tables.sections.get(&i64::from(id)).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Section>> {
        let tables = self.store.tables().lock().await;
        Ok(tables.sections.values().find(|s| &s.slug == slug).cloned())
    }

    async fn list(&self, list_window: ListWindow) -> DomainResult<Vec<Section>> {
        let tables = self.store.tables().lock().await;
        let mut sections: Vec<Section> = tables.sections.values().cloned().collect();
        sections.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(window(sections, list_window))
    }
}

#[derive(Clone)]
pub struct InMemoryTagRepository {
    store: InMemoryStore,
}

impl InMemoryTagRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn insert_if_absent(&self, name: TagName) -> DomainResult<(Tag, bool)> {
        let mut tables = self.store.tables().lock().await;
        if let Some(existing) = tables.tags.values().find(|tag| tag.name == name) {
            return Ok((existing.clone(), false));
        }
        let id = tables.tag_ids.next();
        let tag = Tag {
            id: TagId::new(id)?,
            name,
        };
        tables.tags.insert(id, tag.clone());
        Ok((tag, true))
    }

    async fn rename(&self, id: TagId, name: TagName) -> DomainResult<Tag> {
        let mut tables = self.store.tables().lock().await;
        if tables.tags.values().any(|tag| tag.name == name && tag.id != id) {
            return Err(DomainError::Conflict("tag already exists".into()));
        }
        let tag = tables
            .tags
            .get_mut(&i64::from(id))
            .ok_or_else(|| DomainError::NotFound("tag not found".into()))?;
        tag.name = name;
        Ok(tag.clone())
    }

    async fn delete(&self, id: TagId) -> DomainResult<()> {
        let mut tables = self.store.tables().lock().await;
        if tables.tags.remove(&i64::from(id)).is_none() {
            return Err(DomainError::NotFound("tag not found".into()));
        }
        for record in tables.articles.values_mut() {
            record.tag_ids.retain(|tag| *tag != id);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TagId) -> DomainResult<Option<Tag>> {
        let tables = self.store.tables().lock().await;
        Ok(tables.tags.get(&i64::from(id)).cloned())
    }

    async fn find_by_name(&self, name: &TagName) -> DomainResult<Option<Tag>> {
        let tables = self.store.tables().lock().await;
        Ok(tables.tags.values().find(|tag| &tag.name == name).cloned())
    }

    async fn list(&self, search: Option<&str>, list_window: ListWindow) -> DomainResult<Vec<Tag>> {
        let tables = self.store.tables().lock().await;
        let mut tags: Vec<Tag> = tables
            .tags
            .values()
            .filter(|tag| search.is_none_or(|q| contains_ignore_case(tag.name.as_str(), q)))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()).then(a.id.cmp(&b.id)));
        Ok(window(tags, list_window))
    }
}

#[derive(Clone)]
pub struct InMemoryPersonRepository {
    store: InMemoryStore,
}

impl InMemoryPersonRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn insert(&self, person: NewPerson) -> DomainResult<Person> {
        let mut tables = self.store.tables().lock().await;
        let id = tables.person_ids.next();
        let stored = Person {
            id: PersonId::new(id)?,
            full_name: person.full_name,
            slug: person.slug,
            description: person.description,
            created_at: person.created_at,
        };
        tables.people.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: PersonUpdate) -> DomainResult<Person> {
        let mut tables = self.store.tables().lock().await;
        let person = tables
            .people
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("person not found".into()))?;
        if let Some(full_name) = update.full_name {
            person.full_name = full_name;
        }
        if let Some(slug) = update.slug {
            person.slug = slug;
        }
        if let Some(description) = update.description {
            person.description = description;
        }
        Ok(person.clone())
    }

    async fn delete(&self, id: PersonId) -> DomainResult<()> {
        let mut tables = self.store.tables().lock().await;
        if tables.people.remove(&i64::from(id)).is_none() {
            return Err(DomainError::NotFound("person not found".into()));
        }
        for record in tables.articles.values_mut() {
            record.article.author_ids.retain(|author| *author != id);
        }
        for image in tables.images.values_mut() {
            image.authors.retain(|author| *author != id);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: PersonId) -> DomainResult<Option<Person>> {
        let tables = self.store.tables().lock().await;
        Ok(tables.people.get(&i64::from(id)).cloned())
    }

    async fn list(
        &self,
        search: Option<&str>,
        list_window: ListWindow,
    ) -> DomainResult<Vec<Person>> {
        let tables = self.store.tables().lock().await;
        let mut people: Vec<Person> = tables
            .people
            .values()
            .filter(|person| search.is_none_or(|q| contains_ignore_case(&person.full_name, q)))
            .cloned()
            .collect();
        people.sort_by(|a, b| a.full_name.cmp(&b.full_name).then(a.id.cmp(&b.id)));
        Ok(window(people, list_window))
    }
}
