// src/presentation/http/controllers/frontpage.rs
use crate::application::{
    dto::{ArticleDto, PageRequest, ResourcePage},
    queries::articles::FrontpageQuery,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::PageParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FrontpageParams {
    pub section_id: Option<i64>,
    pub section_slug: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/v1/frontpage",
    tag = "Frontpage",
    params(FrontpageParams),
    responses(
        (status = 200, description = "Published articles, most recently published first", body = ResourcePage<ArticleDto>),
        (status = 400, description = "Both section_id and section_slug given", body = ErrorResponse),
        (status = 404, description = "Section not found", body = ErrorResponse)
    )
)]
pub async fn frontpage(
    Extension(state): Extension<HttpState>,
    Query(params): Query<FrontpageParams>,
) -> HttpResult<Json<ResourcePage<ArticleDto>>> {
    let query = FrontpageQuery {
        section_id: params.section_id,
        section_slug: params.section_slug,
        page: PageRequest::new(params.limit, params.offset),
    };
    run(state, query).await
}

#[utoipa::path(
    get,
    path = "/api/v1/sections/{id}/frontpage",
    tag = "Frontpage",
    params(("id" = i64, Path, description = "Section id"), PageParams),
    responses(
        (status = 200, description = "Published articles in the section", body = ResourcePage<ArticleDto>),
        (status = 404, description = "Section not found", body = ErrorResponse)
    )
)]
pub async fn section_frontpage(
    Extension(state): Extension<HttpState>,
    Path(section_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<ResourcePage<ArticleDto>>> {
    let query = FrontpageQuery {
        section_id: Some(section_id),
        section_slug: None,
        page: params.request(),
    };
    run(state, query).await
}

#[utoipa::path(
    get,
    path = "/api/v1/sections/by-slug/{slug}/frontpage",
    tag = "Frontpage",
    params(("slug" = String, Path, description = "Section slug"), PageParams),
    responses(
        (status = 200, description = "Published articles in the section", body = ResourcePage<ArticleDto>),
        (status = 404, description = "Section not found", body = ErrorResponse)
    )
)]
pub async fn section_frontpage_by_slug(
    Extension(state): Extension<HttpState>,
    Path(section_slug): Path<String>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<ResourcePage<ArticleDto>>> {
    let query = FrontpageQuery {
        section_id: None,
        section_slug: Some(section_slug),
        page: params.request(),
    };
    run(state, query).await
}

async fn run(state: HttpState, query: FrontpageQuery) -> HttpResult<Json<ResourcePage<ArticleDto>>> {
    state
        .services
        .article_queries()
        .frontpage(query)
        .await
        .into_http()
        .map(Json)
}
