pub mod database;
pub mod repositories;
pub mod theme;
pub mod time;
pub mod util;
