// src/domain/layout/theme.rs
use crate::domain::layout::fields::FieldDefinition;
use crate::domain::layout::value_objects::{ComponentSlug, PageSlug, SpotId};
use serde::Deserialize;
use thiserror::Error;

/// Startup declaration of spots, page templates and components.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub spots: Vec<SpotConfig>,
    #[serde(default)]
    pub pages: Vec<PageTemplateConfig>,
    pub components: Vec<ComponentConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotConfig {
    pub id: SpotId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageTemplateConfig {
    pub slug: PageSlug,
    pub name: String,
    pub spots: Vec<SpotId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentConfig {
    pub slug: ComponentSlug,
    pub name: String,
    pub spots: Vec<SpotId>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl ThemeConfig {
    pub fn from_json(raw: &str) -> Result<Self, ThemeError> {
        serde_json::from_str(raw).map_err(|err| ThemeError::Parse(err.to_string()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("theme could not be parsed: {0}")]
    Parse(String),
    #[error("spot '{0}' is declared more than once")]
    DuplicateSpot(String),
    #[error("component '{0}' is registered more than once")]
    DuplicateComponent(String),
    #[error("page template '{0}' is declared more than once")]
    DuplicatePage(String),
    #[error("{owner} references unknown spot '{spot}'")]
    UnknownSpot { owner: String, spot: String },
    #[error("component '{component}' declares field '{field}' more than once")]
    DuplicateField { component: String, field: String },
    #[error("component '{component}' uses reserved field name '{field}'")]
    ReservedField { component: String, field: String },
    #[error("component '{component}' declares select field '{field}' without options")]
    EmptyOptions { component: String, field: String },
    #[error("component '{component}' field '{field}' has an invalid default: {reason}")]
    InvalidDefault {
        component: String,
        field: String,
        reason: String,
    },
}
