use crate::domain::section::Section;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SectionDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<Section> for SectionDto {
    fn from(section: Section) -> Self {
        Self {
            id: section.id.into(),
            name: section.name,
            slug: section.slug.into_inner(),
        }
    }
}
