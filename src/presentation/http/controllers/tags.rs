// src/presentation/http/controllers/tags.rs
use super::{SearchParams, StatusResponse};
use crate::application::dto::{ResourcePage, TagDto};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct TagRequest {
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/tags",
    tag = "Tags",
    params(SearchParams),
    responses((status = 200, description = "Tags by name", body = ResourcePage<TagDto>))
)]
pub async fn list_tags(
    Extension(state): Extension<HttpState>,
    Query(params): Query<SearchParams>,
) -> HttpResult<Json<ResourcePage<TagDto>>> {
    let page = params.request();
    state
        .services
        .tag_queries()
        .list_tags(params.q, page)
        .await
        .into_http()
        .map(Json)
}

/// Creating a tag whose name already exists returns the stored tag with 200.
#[utoipa::path(
    post,
    path = "/api/v1/tags",
    tag = "Tags",
    request_body = TagRequest,
    responses(
        (status = 201, description = "Tag created", body = TagDto),
        (status = 200, description = "Tag already existed", body = TagDto)
    )
)]
pub async fn create_tag(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<TagRequest>,
) -> HttpResult<(StatusCode, Json<TagDto>)> {
    let outcome = state
        .services
        .tag_commands()
        .create_tag(payload.name)
        .await
        .into_http()?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.tag)))
}

#[utoipa::path(
    get,
    path = "/api/v1/tags/{id}",
    tag = "Tags",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag", body = TagDto),
        (status = 404, description = "Tag not found", body = ErrorResponse)
    )
)]
pub async fn get_tag(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<TagDto>> {
    state
        .services
        .tag_queries()
        .get_tag(id)
        .await
        .into_http()
        .map(Json)
}

/// PUT and PATCH both rename; a tag has no other writable field.
#[utoipa::path(
    put,
    path = "/api/v1/tags/{id}",
    tag = "Tags",
    params(("id" = i64, Path, description = "Tag id")),
    request_body = TagRequest,
    responses(
        (status = 200, description = "Tag renamed", body = TagDto),
        (status = 404, description = "Tag not found", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
pub async fn rename_tag(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<TagRequest>,
) -> HttpResult<Json<TagDto>> {
    state
        .services
        .tag_commands()
        .rename_tag(id, payload.name)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    patch,
    path = "/api/v1/tags/{id}",
    tag = "Tags",
    params(("id" = i64, Path, description = "Tag id")),
    request_body = TagRequest,
    responses(
        (status = 200, description = "Tag renamed", body = TagDto),
        (status = 404, description = "Tag not found", body = ErrorResponse)
    )
)]
pub async fn patch_tag(
    state: Extension<HttpState>,
    id: Path<i64>,
    payload: Json<TagRequest>,
) -> HttpResult<Json<TagDto>> {
    rename_tag(state, id, payload).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/tags/{id}",
    tag = "Tags",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag deleted", body = StatusResponse),
        (status = 404, description = "Tag not found", body = ErrorResponse)
    )
)]
pub async fn delete_tag(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .tag_commands()
        .delete_tag(id)
        .await
        .into_http()?;
    Ok(Json(StatusResponse::deleted()))
}
