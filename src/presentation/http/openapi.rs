// src/presentation/http/openapi.rs
use crate::presentation::http::controllers::{
    SavedResponse, StatusResponse, articles, frontpage, images, layout, people, sections, tags,
};
use axum::{Json, Router, response::Redirect, routing::get};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::server::Server;
use utoipa::{Modify, OpenApi};
use utoipa_redoc::{Redoc, Servable};

const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";
const DEFAULT_SNAPSHOT_PATH: &str = "spec/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        layout::page_components,
        layout::save_component,
        layout::clear_spot,
        layout::delete_page,
        articles::list_articles,
        articles::create_article,
        articles::get_article,
        articles::replace_article,
        articles::patch_article,
        articles::delete_article,
        articles::get_revision,
        articles::list_revisions,
        articles::article_attachments,
        articles::attach_image,
        articles::list_attachments,
        frontpage::frontpage,
        frontpage::section_frontpage,
        frontpage::section_frontpage_by_slug,
        sections::list_sections,
        sections::create_section,
        sections::get_section,
        sections::replace_section,
        sections::patch_section,
        sections::delete_section,
        people::list_people,
        people::create_person,
        people::get_person,
        people::replace_person,
        people::patch_person,
        people::delete_person,
        tags::list_tags,
        tags::create_tag,
        tags::get_tag,
        tags::rename_tag,
        tags::patch_tag,
        tags::delete_tag,
        images::list_images,
        images::create_image,
        images::get_image,
        images::replace_image,
        images::patch_image,
        images::delete_image,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            SavedResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::application::dto::PageLayoutDto,
            crate::application::dto::SpotDto,
            crate::application::dto::ComponentOptionDto,
            crate::application::dto::SavedComponentDto
        )
    ),
    tags(
        (name = "Layout", description = "Page layouts: spots, component schemas and placements"),
        (name = "Articles", description = "Articles and their revisions"),
        (name = "Attachments", description = "Images attached to articles"),
        (name = "Frontpage", description = "Published article listings"),
        (name = "Sections", description = "Site sections"),
        (name = "People", description = "Authors and contributors"),
        (name = "Tags", description = "Article tags"),
        (name = "Images", description = "Image library"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Dispatch API",
        description = "Newspaper content and page layout API",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if urls.is_empty() {
            urls.push(DEFAULT_SERVER.to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn docs_router() -> Router {
    let redoc = Redoc::with_url("/redoc", ApiDoc::openapi());
    Router::new()
        .route("/openapi.json", get(serve_openapi))
        .merge(redoc)
        .route("/", get(|| async { Redirect::temporary("/redoc") }))
}

/// Write the OpenAPI document to `OPENAPI_SNAPSHOT_PATH` (default `spec/openapi.json`).
pub fn write_openapi_snapshot() -> std::io::Result<()> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_layout_and_resource_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/v1/pages/{slug}/components",
            "/api/v1/pages/{slug}/components/{spot}",
            "/api/v1/articles/{id}/revision",
            "/api/v1/sections/by-slug/{slug}/frontpage",
            "/api/v1/tags/{id}",
            "/health",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }
}
