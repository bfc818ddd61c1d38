use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Everything the page editor needs to render one page's layout form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageLayoutDto {
    pub spots: Vec<SpotDto>,
    /// Field schema per component slug, each slug listed once.
    #[schema(value_type = Object)]
    pub components: Map<String, Value>,
    /// Saved component per spot.
    pub saved: BTreeMap<String, SavedComponentDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SpotDto {
    pub name: String,
    pub slug: String,
    pub options: Vec<ComponentOptionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComponentOptionDto {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SavedComponentDto {
    pub slug: String,
    #[schema(value_type = Object)]
    pub fields: Value,
}

/// Outcome of a layout write; `page_created` drives the 201/200 status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveComponentDto {
    pub page_created: bool,
    pub placement_replaced: bool,
}
