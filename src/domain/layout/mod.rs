pub mod component;
pub mod entity;
pub mod fields;
pub mod registry;
pub mod repository;
pub mod theme;
pub mod value_objects;

pub use component::{
    Component, ComponentClass, ComponentInstance, FieldData, SchemaComponent, SubmissionEncoding,
};
pub use entity::{NewPlacement, Page, PageHandle, Placement};
pub use fields::{FieldDefinition, FieldKind, SelectOption};
pub use registry::{ComponentRegistry, LayoutRejection, Spot};
pub use repository::{LayoutRepository, LayoutUnitOfWork};
pub use theme::{ThemeConfig, ThemeError};
pub use value_objects::{ComponentSlug, PageId, PageSlug, PlacementId, SpotId};
