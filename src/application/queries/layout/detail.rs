use super::LayoutQueryService;
use crate::{
    application::{
        dto::{ComponentOptionDto, PageLayoutDto, SavedComponentDto, SpotDto},
        error::ApplicationResult,
    },
    domain::layout::{ComponentInstance, Page, PageSlug},
};
use serde_json::Map;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct PageDetailQuery {
    pub slug: String,
}

impl LayoutQueryService {
    /// Layout form for a page. A page that was never saved is reported with
    /// every spot available and nothing saved.
    pub async fn page_detail(&self, query: PageDetailQuery) -> ApplicationResult<PageLayoutDto> {
        let slug = PageSlug::new(query.slug)?;
        let page = self.repo.find_page(&slug).await?;
        if page.is_none() {
            debug!(page = %slug, "page has no saved layout yet");
        }

        let saved = page
            .as_ref()
            .map(|page| self.saved_components(page))
            .unwrap_or_default();

        let mut spots = Vec::new();
        let mut components = Map::new();
        for spot in self.registry.spots_for_page(&slug) {
            let mut options = Vec::new();
            for class in self.registry.classes_for_spot(&spot.id) {
                options.push(ComponentOptionDto {
                    name: class.name().to_string(),
                    slug: class.slug().to_string(),
                });
                if !components.contains_key(class.slug().as_str()) {
                    let schema = ComponentInstance::empty(Arc::clone(class)).fields_as_json();
                    components.insert(class.slug().to_string(), schema);
                }
            }
            spots.push(SpotDto {
                name: spot.name.clone(),
                slug: spot.id.to_string(),
                options,
            });
        }

        Ok(PageLayoutDto {
            spots,
            components,
            saved,
        })
    }

    fn saved_components(&self, page: &Page) -> BTreeMap<String, SavedComponentDto> {
        let mut saved = BTreeMap::new();
        for placement in &page.placements {
            let Some(class) = self.registry.resolve_class(placement.component.as_str()) else {
                warn!(
                    page = %page.slug,
                    spot = %placement.spot,
                    component = %placement.component,
                    "placement references a component missing from the theme; skipping"
                );
                continue;
            };
            let instance = ComponentInstance::from_stored(Arc::clone(class), &placement.data);
            saved.insert(
                placement.spot.to_string(),
                SavedComponentDto {
                    slug: instance.slug().to_string(),
                    fields: instance.data_as_json(),
                },
            );
        }
        saved
    }
}
