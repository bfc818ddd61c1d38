//! Theme loading. The bundled theme is compiled in; `THEME_PATH` overrides it.

use std::path::Path;

use crate::domain::layout::{ComponentRegistry, ThemeConfig, ThemeError};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_THEME: &str = include_str!("../../themes/default.json");

#[derive(Debug, Error)]
pub enum ThemeLoadError {
    #[error("failed to read theme file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Invalid(#[from] ThemeError),
}

/// Parse a theme document and build the registry from it.
pub fn registry_from_json(raw: &str) -> Result<ComponentRegistry, ThemeError> {
    let theme = ThemeConfig::from_json(raw)?;
    let registry = ComponentRegistry::from_theme(&theme)?;
    info!(
        theme = theme.name.as_deref().unwrap_or("unnamed"),
        spots = registry.all_spots().len(),
        components = registry.components().len(),
        "component registry built"
    );
    Ok(registry)
}

pub async fn load_registry(path: Option<&Path>) -> Result<ComponentRegistry, ThemeLoadError> {
    match path {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ThemeLoadError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
            Ok(registry_from_json(&raw)?)
        }
        None => Ok(registry_from_json(DEFAULT_THEME)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layout::{PageSlug, SpotId};

    #[test]
    fn bundled_theme_is_valid() {
        let registry = registry_from_json(DEFAULT_THEME).unwrap();
        let about = registry.spots_for_page(&PageSlug::new("about").unwrap());
        assert_eq!(about.len(), 2);
        let sidebar: Vec<_> = registry
            .classes_for_spot(&SpotId::new("sidebar").unwrap())
            .map(|class| class.slug().to_string())
            .collect();
        assert_eq!(sidebar, vec!["article_list", "promo", "html_block"]);
    }

    #[tokio::test]
    async fn missing_theme_file_is_reported() {
        let err = load_registry(Some(Path::new("/nonexistent/theme.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, ThemeLoadError::Read { .. }));
    }
}
