use crate::domain::errors::DomainResult;
use crate::domain::layout::entity::{NewPlacement, Page, PageHandle, Placement};
use crate::domain::layout::value_objects::{PageId, PageSlug, PlacementId, SpotId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait LayoutRepository: Send + Sync {
    /// Page with all of its placements.
    async fn find_page(&self, slug: &PageSlug) -> DomainResult<Option<Page>>;

    /// Remove a page and, by cascade, its placements. Returns whether a page existed.
    async fn delete_page(&self, slug: &PageSlug) -> DomainResult<bool>;

    /// Start an atomic unit of work. Dropping it without `commit` discards every write.
    async fn begin(&self) -> DomainResult<Box<dyn LayoutUnitOfWork>>;
}

#[async_trait]
pub trait LayoutUnitOfWork: Send {
    async fn find_or_create_page(
        &mut self,
        slug: &PageSlug,
        now: DateTime<Utc>,
    ) -> DomainResult<PageHandle>;

    async fn find_page_id(&mut self, slug: &PageSlug) -> DomainResult<Option<PageId>>;

    /// Existing placement at (page, spot), locked for the rest of the unit of work.
    async fn find_placement(
        &mut self,
        page: PageId,
        spot: &SpotId,
    ) -> DomainResult<Option<Placement>>;

    async fn remove_placement(&mut self, id: PlacementId) -> DomainResult<()>;

    /// Insert or replace the placement at (page, spot).
    async fn put_placement(&mut self, placement: NewPlacement) -> DomainResult<Placement>;

    async fn touch_page(&mut self, page: PageId, now: DateTime<Utc>) -> DomainResult<()>;

    async fn commit(self: Box<Self>) -> DomainResult<()>;
}
