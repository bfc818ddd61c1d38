mod detail;
mod service;

pub use detail::PageDetailQuery;
pub use service::LayoutQueryService;
