pub mod articles;
pub mod images;
pub mod layout;
pub mod pagination;
pub mod people;
pub mod sections;
pub mod tags;

pub use articles::{ArticleDto, ArticleRevisionDto};
pub use images::{ImageAttachmentDto, ImageDto};
pub use layout::{ComponentOptionDto, PageLayoutDto, SaveComponentDto, SavedComponentDto, SpotDto};
pub use pagination::{PageRequest, ResourcePage};
pub use people::PersonDto;
pub use sections::SectionDto;
pub use tags::TagDto;
