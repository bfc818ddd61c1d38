pub mod articles;
pub mod frontpage;
pub mod images;
pub mod layout;
pub mod people;
pub mod sections;
pub mod tags;

use crate::application::dto::PageRequest;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn deleted() -> Self {
        Self {
            status: "deleted".into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SavedResponse {
    pub saved: bool,
}

/// `limit`/`offset` pair accepted by every listing endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PageParams {
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.limit, self.offset)
    }
}

/// Free-text search plus paging.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl SearchParams {
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.limit, self.offset)
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
/// Pair with `#[serde(default)]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct CaptionPatch {
        #[serde(default, deserialize_with = "nullable")]
        caption: Option<Option<String>>,
    }

    #[test]
    fn nullable_tells_missing_from_null() {
        let missing: CaptionPatch = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.caption, None);
        let null: CaptionPatch = serde_json::from_str(r#"{"caption": null}"#).unwrap();
        assert_eq!(null.caption, Some(None));
        let set: CaptionPatch = serde_json::from_str(r#"{"caption": "x"}"#).unwrap();
        assert_eq!(set.caption, Some(Some("x".into())));
    }
}
