use super::{InMemoryStore, Tables};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::layout::{
    LayoutRepository, LayoutUnitOfWork, NewPlacement, Page, PageHandle, PageId, PageSlug,
    Placement, PlacementId, SpotId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::OwnedMutexGuard;

#[derive(Clone)]
pub struct InMemoryLayoutRepository {
    store: InMemoryStore,
}

impl InMemoryLayoutRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn page_id_by_slug(tables: &Tables, slug: &PageSlug) -> Option<i64> {
    tables
        .pages
        .values()
        .find(|page| &page.slug == slug)
        .map(|page| page.id.0)
}

#[async_trait]
impl LayoutRepository for InMemoryLayoutRepository {
    async fn find_page(&self, slug: &PageSlug) -> DomainResult<Option<Page>> {
        let tables = self.store.tables().lock().await;
        let Some(id) = page_id_by_slug(&tables, slug) else {
            return Ok(None);
        };
        let Some(stored) = tables.pages.get(&id) else {
            return Ok(None);
        };
        let mut page = stored.clone();
        page.placements = tables
            .placements
            .values()
            .filter(|placement| placement.page_id.0 == id)
            .cloned()
            .collect();
        page.placements.sort_by(|a, b| a.spot.cmp(&b.spot));
        Ok(Some(page))
    }

    async fn delete_page(&self, slug: &PageSlug) -> DomainResult<bool> {
        let mut tables = self.store.tables().lock().await;
        let Some(id) = page_id_by_slug(&tables, slug) else {
            return Ok(false);
        };
        tables.pages.remove(&id);
        tables.placements.retain(|_, placement| placement.page_id.0 != id);
        Ok(true)
    }

    async fn begin(&self) -> DomainResult<Box<dyn LayoutUnitOfWork>> {
        let guard = self.store.tables().clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryLayoutUnitOfWork { guard, working }))
    }
}

/// Holds the store lock; writes land in `working` until `commit`.
pub struct InMemoryLayoutUnitOfWork {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

#[async_trait]
impl LayoutUnitOfWork for InMemoryLayoutUnitOfWork {
    async fn find_or_create_page(
        &mut self,
        slug: &PageSlug,
        now: DateTime<Utc>,
    ) -> DomainResult<PageHandle> {
        if let Some(id) = page_id_by_slug(&self.working, slug) {
            return Ok(PageHandle {
                id: PageId(id),
                created: false,
            });
        }
        let id = self.working.page_ids.next();
        self.working.pages.insert(
            id,
            Page {
                id: PageId(id),
                slug: slug.clone(),
                created_at: now,
                updated_at: now,
                placements: Vec::new(),
            },
        );
        Ok(PageHandle {
            id: PageId(id),
            created: true,
        })
    }

    async fn find_page_id(&mut self, slug: &PageSlug) -> DomainResult<Option<PageId>> {
        Ok(page_id_by_slug(&self.working, slug).map(PageId))
    }

    async fn find_placement(
        &mut self,
        page: PageId,
        spot: &SpotId,
    ) -> DomainResult<Option<Placement>> {
        Ok(self
            .working
            .placements
            .values()
            .find(|placement| placement.page_id == page && &placement.spot == spot)
            .cloned())
    }

    async fn remove_placement(&mut self, id: PlacementId) -> DomainResult<()> {
        self.working.placements.remove(&id.0);
        Ok(())
    }

    async fn put_placement(&mut self, placement: NewPlacement) -> DomainResult<Placement> {
        if !self.working.pages.contains_key(&placement.page_id.0) {
            return Err(DomainError::NotFound("page not found".into()));
        }
        let existing = self
            .working
            .placements
            .values_mut()
            .find(|stored| stored.page_id == placement.page_id && stored.spot == placement.spot);

        if let Some(stored) = existing {
            stored.component = placement.component;
            stored.data = placement.data;
            stored.updated_at = placement.now;
            return Ok(stored.clone());
        }

        let id = self.working.placement_ids.next();
        let stored = Placement {
            id: PlacementId(id),
            page_id: placement.page_id,
            spot: placement.spot,
            component: placement.component,
            data: placement.data,
            created_at: placement.now,
            updated_at: placement.now,
        };
        self.working.placements.insert(id, stored.clone());
        Ok(stored)
    }

    async fn touch_page(&mut self, page: PageId, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(stored) = self.working.pages.get_mut(&page.0) {
            stored.updated_at = now;
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let Self { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layout::ComponentSlug;
    use serde_json::{Map, json};

    fn placement(page: PageId, spot: &str, component: &str) -> NewPlacement {
        let mut data = Map::new();
        data.insert("title".into(), json!(component));
        NewPlacement {
            page_id: page,
            spot: SpotId::new(spot).unwrap(),
            component: ComponentSlug::new(component).unwrap(),
            data,
            now: Utc::now(),
        }
    }

    #[tokio::test]
    async fn dropped_unit_of_work_discards_writes() {
        let repo = InMemoryLayoutRepository::new(InMemoryStore::new());
        let slug = PageSlug::new("home").unwrap();
        {
            let mut uow = repo.begin().await.unwrap();
            let page = uow.find_or_create_page(&slug, Utc::now()).await.unwrap();
            assert!(page.created);
        }
        assert!(repo.find_page(&slug).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_placement_replaces_same_spot() {
        let repo = InMemoryLayoutRepository::new(InMemoryStore::new());
        let slug = PageSlug::new("home").unwrap();

        let mut uow = repo.begin().await.unwrap();
        let page = uow.find_or_create_page(&slug, Utc::now()).await.unwrap();
        uow.put_placement(placement(page.id, "hero", "banner")).await.unwrap();
        uow.put_placement(placement(page.id, "hero", "teaser")).await.unwrap();
        uow.put_placement(placement(page.id, "sidebar", "banner")).await.unwrap();
        uow.commit().await.unwrap();

        let stored = repo.find_page(&slug).await.unwrap().unwrap();
        assert_eq!(stored.placements.len(), 2);
        let hero = stored.placement_at(&SpotId::new("hero").unwrap()).unwrap();
        assert_eq!(hero.component.as_str(), "teaser");

        let mut uow = repo.begin().await.unwrap();
        assert!(!uow.find_or_create_page(&slug, Utc::now()).await.unwrap().created);
    }

    #[tokio::test]
    async fn delete_page_cascades_placements() {
        let store = InMemoryStore::new();
        let repo = InMemoryLayoutRepository::new(store.clone());
        let slug = PageSlug::new("home").unwrap();

        let mut uow = repo.begin().await.unwrap();
        let page = uow.find_or_create_page(&slug, Utc::now()).await.unwrap();
        uow.put_placement(placement(page.id, "hero", "banner")).await.unwrap();
        uow.commit().await.unwrap();

        assert!(repo.delete_page(&slug).await.unwrap());
        assert!(!repo.delete_page(&slug).await.unwrap());
        assert!(store.tables().lock().await.placements.is_empty());
    }
}
