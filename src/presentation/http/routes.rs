// src/presentation/http/routes.rs
use crate::presentation::http::controllers::{
    StatusResponse, articles, frontpage, images, layout, people, sections, tags,
};
use crate::presentation::http::{openapi, state::HttpState};
use axum::{
    Extension, Json, Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

fn api_routes() -> Router {
    Router::new()
        .route(
            "/pages/{slug}/components",
            get(layout::page_components).post(layout::save_component),
        )
        .route("/pages/{slug}/components/{spot}", delete(layout::clear_spot))
        .route("/pages/{slug}", delete(layout::delete_page))
        .route(
            "/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/articles/{id}",
            get(articles::get_article)
                .put(articles::replace_article)
                .patch(articles::patch_article)
                .delete(articles::delete_article),
        )
        .route("/articles/{id}/revision", get(articles::get_revision))
        .route("/articles/{id}/revisions", get(articles::list_revisions))
        .route(
            "/articles/{id}/attachments",
            get(articles::article_attachments).post(articles::attach_image),
        )
        .route("/attachments", get(articles::list_attachments))
        .route("/frontpage", get(frontpage::frontpage))
        .route(
            "/sections",
            get(sections::list_sections).post(sections::create_section),
        )
        .route(
            "/sections/{id}",
            get(sections::get_section)
                .put(sections::replace_section)
                .patch(sections::patch_section)
                .delete(sections::delete_section),
        )
        .route("/sections/{id}/frontpage", get(frontpage::section_frontpage))
        .route(
            "/sections/by-slug/{slug}/frontpage",
            get(frontpage::section_frontpage_by_slug),
        )
        .route("/people", get(people::list_people).post(people::create_person))
        .route(
            "/people/{id}",
            get(people::get_person)
                .put(people::replace_person)
                .patch(people::patch_person)
                .delete(people::delete_person),
        )
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
        .route(
            "/tags/{id}",
            get(tags::get_tag)
                .put(tags::rename_tag)
                .patch(tags::patch_tag)
                .delete(tags::delete_tag),
        )
        .route("/images", get(images::list_images).post(images::create_image))
        .route(
            "/images/{id}",
            get(images::get_image)
                .put(images::replace_image)
                .patch(images::patch_image)
                .delete(images::delete_image),
        )
}

/// Any origin when none are configured; otherwise only the listed ones.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("x-person-id"),
        ])
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
    })
}
