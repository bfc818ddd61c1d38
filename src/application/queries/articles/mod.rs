mod attachments;
mod frontpage;
mod get_by_id;
mod list;
mod revisions;
mod service;

pub use attachments::ListAttachmentsQuery;
pub use frontpage::FrontpageQuery;
pub use get_by_id::GetArticleByIdQuery;
pub use list::ListArticlesQuery;
pub use revisions::GetArticleRevisionQuery;
pub use service::ArticleQueryService;
