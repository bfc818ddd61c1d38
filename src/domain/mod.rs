pub mod article;
pub mod common;
pub mod errors;
pub mod image;
pub mod layout;
pub mod person;
pub mod section;
pub mod tag;
