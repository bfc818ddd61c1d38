mod clear;
mod save;
mod service;

pub use clear::{ClearSpotCommand, DeletePageCommand};
pub use save::SaveComponentCommand;
pub use service::LayoutCommandService;
