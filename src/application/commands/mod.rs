pub mod articles;
pub mod images;
pub mod layout;
pub mod people;
pub mod sections;
pub mod tags;
