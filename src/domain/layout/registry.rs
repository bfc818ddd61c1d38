use crate::domain::layout::component::{ComponentClass, SchemaComponent};
use crate::domain::layout::fields::{FieldDefinition, FieldKind};
use crate::domain::layout::theme::{ThemeConfig, ThemeError};
use crate::domain::layout::value_objects::{ComponentSlug, PageSlug, SpotId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Submission field names used to address the placement itself.
pub const RESERVED_FIELDS: [&str; 2] = ["component", "spot"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spot {
    pub id: SpotId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct PageTemplate {
    pub slug: PageSlug,
    pub name: String,
    pub spots: Vec<SpotId>,
}

/// Why a (page, spot, component) combination cannot be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutRejection {
    UnknownSpot,
    NotEligible,
}

/// Immutable catalog of component classes and the spots they may occupy.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: Vec<ComponentClass>,
    by_slug: HashMap<ComponentSlug, usize>,
    spots: Vec<Spot>,
    by_spot: HashMap<SpotId, Vec<usize>>,
    templates: HashMap<PageSlug, PageTemplate>,
}

impl ComponentRegistry {
    pub fn builder() -> ComponentRegistryBuilder {
        ComponentRegistryBuilder::default()
    }

    pub fn from_theme(theme: &ThemeConfig) -> Result<Self, ThemeError> {
        let mut builder = Self::builder();
        for spot in &theme.spots {
            builder = builder.spot(spot.id.clone(), spot.name.clone());
        }
        for page in &theme.pages {
            builder = builder.page(page.slug.clone(), page.name.clone(), page.spots.clone());
        }
        for component in &theme.components {
            builder = builder.register(Arc::new(SchemaComponent::new(
                component.slug.clone(),
                component.name.clone(),
                component.spots.clone(),
                component.fields.clone(),
            )));
        }
        builder.build()
    }

    pub fn resolve_class(&self, slug: &str) -> Option<&ComponentClass> {
        let slug = ComponentSlug::new(slug).ok()?;
        self.by_slug.get(&slug).map(|idx| &self.components[*idx])
    }

    /// Eligible classes for `spot`, in registration order.
    pub fn classes_for_spot<'a>(
        &'a self,
        spot: &SpotId,
    ) -> impl Iterator<Item = &'a ComponentClass> + 'a {
        self.by_spot
            .get(spot)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|idx| &self.components[*idx])
    }

    pub fn all_spots(&self) -> &[Spot] {
        &self.spots
    }

    pub fn components(&self) -> &[ComponentClass] {
        &self.components
    }

    /// Spots offered on `page`: its template's spots when one exists, otherwise every theme spot.
    pub fn spots_for_page(&self, page: &PageSlug) -> Vec<&Spot> {
        match self.templates.get(page) {
            Some(template) => template
                .spots
                .iter()
                .filter_map(|id| self.spots.iter().find(|spot| &spot.id == id))
                .collect(),
            None => self.spots.iter().collect(),
        }
    }

    pub fn template(&self, page: &PageSlug) -> Option<&PageTemplate> {
        self.templates.get(page)
    }

    pub fn accepts(
        &self,
        page: &PageSlug,
        spot: &SpotId,
        class: &ComponentClass,
    ) -> Result<(), LayoutRejection> {
        let declared = self
            .spots_for_page(page)
            .iter()
            .any(|candidate| &candidate.id == spot);
        if !declared {
            return Err(LayoutRejection::UnknownSpot);
        }
        if !class.allows_spot(spot) {
            return Err(LayoutRejection::NotEligible);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct ComponentRegistryBuilder {
    spots: Vec<Spot>,
    pages: Vec<PageTemplate>,
    components: Vec<ComponentClass>,
}

impl ComponentRegistryBuilder {
    pub fn spot(mut self, id: SpotId, name: impl Into<String>) -> Self {
        self.spots.push(Spot {
            id,
            name: name.into(),
        });
        self
    }

    pub fn page(mut self, slug: PageSlug, name: impl Into<String>, spots: Vec<SpotId>) -> Self {
        self.pages.push(PageTemplate {
            slug,
            name: name.into(),
            spots,
        });
        self
    }

    pub fn register(mut self, class: ComponentClass) -> Self {
        self.components.push(class);
        self
    }

    pub fn build(self) -> Result<ComponentRegistry, ThemeError> {
        let mut registry = ComponentRegistry::default();

        let mut seen_spots = HashSet::new();
        for spot in self.spots {
            if !seen_spots.insert(spot.id.clone()) {
                return Err(ThemeError::DuplicateSpot(spot.id.into()));
            }
            registry.by_spot.insert(spot.id.clone(), Vec::new());
            registry.spots.push(spot);
        }

        for page in self.pages {
            if let Some(missing) = page.spots.iter().find(|id| !seen_spots.contains(*id)) {
                return Err(ThemeError::UnknownSpot {
                    owner: format!("page '{}'", page.slug),
                    spot: missing.to_string(),
                });
            }
            if registry.templates.contains_key(&page.slug) {
                return Err(ThemeError::DuplicatePage(page.slug.into()));
            }
            registry.templates.insert(page.slug.clone(), page);
        }

        for class in self.components {
            let slug = class.slug().clone();
            if registry.by_slug.contains_key(&slug) {
                return Err(ThemeError::DuplicateComponent(slug.into()));
            }
            check_fields(&class)?;

            let idx = registry.components.len();
            for spot in class.spots() {
                let eligible = registry
                    .by_spot
                    .get_mut(spot)
                    .ok_or_else(|| ThemeError::UnknownSpot {
                        owner: format!("component '{slug}'"),
                        spot: spot.to_string(),
                    })?;
                if !eligible.contains(&idx) {
                    eligible.push(idx);
                }
            }
            registry.by_slug.insert(slug, idx);
            registry.components.push(class);
        }

        Ok(registry)
    }
}

fn check_fields(class: &ComponentClass) -> Result<(), ThemeError> {
    let mut names = HashSet::new();
    for field in class.fields() {
        if RESERVED_FIELDS.contains(&field.name.as_str()) {
            return Err(ThemeError::ReservedField {
                component: class.slug().to_string(),
                field: field.name.clone(),
            });
        }
        if !names.insert(field.name.as_str()) {
            return Err(ThemeError::DuplicateField {
                component: class.slug().to_string(),
                field: field.name.clone(),
            });
        }
        if matches!(&field.kind, FieldKind::Select { options } if options.is_empty()) {
            return Err(ThemeError::EmptyOptions {
                component: class.slug().to_string(),
                field: field.name.clone(),
            });
        }
        check_default(class, field)?;
    }
    Ok(())
}

/// A declared default is returned as-is for omitted fields, so it must
/// already be a cleaned value.
fn check_default(class: &ComponentClass, field: &FieldDefinition) -> Result<(), ThemeError> {
    let Some(default) = &field.default else {
        return Ok(());
    };
    let invalid = |reason: String| ThemeError::InvalidDefault {
        component: class.slug().to_string(),
        field: field.name.clone(),
        reason,
    };
    let cleaned = field.clean(Some(default)).map_err(invalid)?;
    if &cleaned != default {
        return Err(invalid(format!("must be written as {cleaned}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layout::fields::SelectOption;
    use serde_json::json;

    fn spot(id: &str) -> SpotId {
        SpotId::new(id).unwrap()
    }

    fn component(slug: &str, spots: &[&str]) -> ComponentClass {
        Arc::new(SchemaComponent::new(
            ComponentSlug::new(slug).unwrap(),
            slug.to_uppercase(),
            spots.iter().map(|s| spot(s)).collect(),
            vec![FieldDefinition::new("title", "Title", FieldKind::Text)],
        ))
    }

    fn registry() -> ComponentRegistry {
        ComponentRegistry::builder()
            .spot(spot("hero"), "Hero")
            .spot(spot("sidebar"), "Sidebar")
            .spot(spot("footer"), "Footer")
            .page(PageSlug::new("article").unwrap(), "Article", vec![spot("sidebar")])
            .register(component("banner", &["hero"]))
            .register(component("list", &["hero", "sidebar"]))
            .register(component("ad", &["sidebar"]))
            .build()
            .unwrap()
    }

    #[test]
    fn classes_for_spot_follow_registration_order() {
        let registry = registry();
        let slugs: Vec<_> = registry
            .classes_for_spot(&spot("sidebar"))
            .map(|class| class.slug().to_string())
            .collect();
        assert_eq!(slugs, ["list", "ad"]);

        // restartable
        assert_eq!(registry.classes_for_spot(&spot("sidebar")).count(), 2);
        assert_eq!(registry.classes_for_spot(&spot("footer")).count(), 0);
        assert_eq!(registry.classes_for_spot(&spot("missing")).count(), 0);
    }

    #[test]
    fn resolve_class_by_slug() {
        let registry = registry();
        assert_eq!(registry.resolve_class("banner").unwrap().name(), "BANNER");
        assert!(registry.resolve_class("nope").is_none());
        assert!(registry.resolve_class("not a slug").is_none());
    }

    #[test]
    fn page_templates_restrict_spots() {
        let registry = registry();
        let article: Vec<_> = registry
            .spots_for_page(&PageSlug::new("article").unwrap())
            .iter()
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(article, ["sidebar"]);

        let home = registry.spots_for_page(&PageSlug::new("home").unwrap());
        assert_eq!(home.len(), 3);
    }

    #[test]
    fn accepts_checks_spot_and_eligibility() {
        let registry = registry();
        let home = PageSlug::new("home").unwrap();
        let article = PageSlug::new("article").unwrap();
        let banner = registry.resolve_class("banner").unwrap().clone();

        assert!(registry.accepts(&home, &spot("hero"), &banner).is_ok());
        assert_eq!(
            registry.accepts(&home, &spot("sidebar"), &banner),
            Err(LayoutRejection::NotEligible)
        );
        assert_eq!(
            registry.accepts(&article, &spot("hero"), &banner),
            Err(LayoutRejection::UnknownSpot)
        );
        assert_eq!(
            registry.accepts(&home, &spot("basement"), &banner),
            Err(LayoutRejection::UnknownSpot)
        );
    }

    #[test]
    fn duplicate_slug_is_fatal() {
        let err = ComponentRegistry::builder()
            .spot(spot("hero"), "Hero")
            .register(component("banner", &["hero"]))
            .register(component("banner", &["hero"]))
            .build()
            .unwrap_err();
        assert_eq!(err, ThemeError::DuplicateComponent("banner".into()));
    }

    #[test]
    fn unknown_spot_reference_is_fatal() {
        let err = ComponentRegistry::builder()
            .spot(spot("hero"), "Hero")
            .register(component("banner", &["hero", "rail"]))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ThemeError::UnknownSpot {
                owner: "component 'banner'".into(),
                spot: "rail".into(),
            }
        );

        let err = ComponentRegistry::builder()
            .spot(spot("hero"), "Hero")
            .page(PageSlug::new("home").unwrap(), "Home", vec![spot("rail")])
            .build()
            .unwrap_err();
        assert!(matches!(err, ThemeError::UnknownSpot { .. }));
    }

    #[test]
    fn duplicate_spot_is_fatal() {
        let err = ComponentRegistry::builder()
            .spot(spot("hero"), "Hero")
            .spot(spot("hero"), "Hero again")
            .build()
            .unwrap_err();
        assert_eq!(err, ThemeError::DuplicateSpot("hero".into()));
    }

    #[test]
    fn reserved_field_names_are_rejected() {
        let class: ComponentClass = Arc::new(SchemaComponent::new(
            ComponentSlug::new("bad").unwrap(),
            "Bad",
            vec![spot("hero")],
            vec![FieldDefinition::new("spot", "Spot", FieldKind::Text)],
        ));
        let err = ComponentRegistry::builder()
            .spot(spot("hero"), "Hero")
            .register(class)
            .build()
            .unwrap_err();
        assert!(matches!(err, ThemeError::ReservedField { .. }));
    }

    fn build_with_field(field: FieldDefinition) -> Result<ComponentRegistry, ThemeError> {
        let class: ComponentClass = Arc::new(SchemaComponent::new(
            ComponentSlug::new("teaser").unwrap(),
            "Teaser",
            vec![spot("hero")],
            vec![field],
        ));
        ComponentRegistry::builder()
            .spot(spot("hero"), "Hero")
            .register(class)
            .build()
    }

    fn wide_only() -> FieldKind {
        FieldKind::Select {
            options: vec![SelectOption {
                value: "wide".into(),
                label: "Wide".into(),
            }],
        }
    }

    #[test]
    fn out_of_range_integer_default_is_fatal() {
        let field = FieldDefinition::new("count", "Count", FieldKind::Integer {
            min: Some(1),
            max: Some(5),
        })
        .with_default(json!(99));
        let err = build_with_field(field).unwrap_err();
        assert_eq!(
            err,
            ThemeError::InvalidDefault {
                component: "teaser".into(),
                field: "count".into(),
                reason: "must be at most 5".into(),
            }
        );
    }

    #[test]
    fn select_default_must_be_an_option() {
        let field = FieldDefinition::new("layout", "Layout", wide_only()).with_default(json!("bogus"));
        assert!(matches!(
            build_with_field(field).unwrap_err(),
            ThemeError::InvalidDefault { field, .. } if field == "layout"
        ));

        let field = FieldDefinition::new("layout", "Layout", wide_only()).with_default(json!("wide"));
        assert!(build_with_field(field).is_ok());
    }

    #[test]
    fn default_must_match_field_kind() {
        let field = FieldDefinition::new("title", "Title", FieldKind::Char { max_length: None })
            .with_default(json!(7));
        assert!(matches!(
            build_with_field(field).unwrap_err(),
            ThemeError::InvalidDefault { reason, .. } if reason == "expected a string"
        ));

        let field = FieldDefinition::new("count", "Count", FieldKind::Integer {
            min: None,
            max: None,
        })
        .with_default(json!("5"));
        assert!(matches!(
            build_with_field(field).unwrap_err(),
            ThemeError::InvalidDefault { reason, .. } if reason == "must be written as 5"
        ));
    }

    #[test]
    fn select_without_options_is_fatal() {
        let field = FieldDefinition::new("layout", "Layout", FieldKind::Select { options: vec![] });
        assert_eq!(
            build_with_field(field).unwrap_err(),
            ThemeError::EmptyOptions {
                component: "teaser".into(),
                field: "layout".into(),
            }
        );
    }

    #[test]
    fn from_theme_parses_json() {
        let theme = ThemeConfig::from_json(
            r#"{
                "spots": [{ "id": "hero", "name": "Hero" }],
                "components": [{
                    "slug": "banner",
                    "name": "Banner",
                    "spots": ["hero"],
                    "fields": [{ "name": "title", "label": "Title", "type": "char", "max_length": 10 }]
                }]
            }"#,
        )
        .unwrap();
        let registry = ComponentRegistry::from_theme(&theme).unwrap();
        assert_eq!(registry.all_spots().len(), 1);
        assert_eq!(registry.components().len(), 1);
    }
}
