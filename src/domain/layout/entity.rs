use crate::domain::layout::component::FieldData;
use crate::domain::layout::value_objects::{ComponentSlug, PageId, PageSlug, PlacementId, SpotId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Page {
    pub id: PageId,
    pub slug: PageSlug,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub placements: Vec<Placement>,
}

impl Page {
    pub fn placement_at(&self, spot: &SpotId) -> Option<&Placement> {
        self.placements.iter().find(|placement| &placement.spot == spot)
    }
}

/// Component data bound to one (page, spot).
#[derive(Debug, Clone)]
pub struct Placement {
    pub id: PlacementId,
    pub page_id: PageId,
    pub spot: SpotId,
    pub component: ComponentSlug,
    pub data: FieldData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPlacement {
    pub page_id: PageId,
    pub spot: SpotId,
    pub component: ComponentSlug,
    pub data: FieldData,
    pub now: DateTime<Utc>,
}

/// Result of resolving a page inside a unit of work.
#[derive(Debug, Clone, Copy)]
pub struct PageHandle {
    pub id: PageId,
    pub created: bool,
}
