// src/presentation/http/controllers/sections.rs
use super::{PageParams, StatusResponse};
use crate::application::{
    commands::sections::{CreateSectionCommand, UpdateSectionCommand},
    dto::{ResourcePage, SectionDto},
};
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
pub struct CreateSectionRequest {
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSectionRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/sections",
    tag = "Sections",
    params(PageParams),
    responses((status = 200, description = "Sections by name", body = ResourcePage<SectionDto>))
)]
pub async fn list_sections(
    Extension(state): Extension<HttpState>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<ResourcePage<SectionDto>>> {
    state
        .services
        .section_queries()
        .list_sections(params.request())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/sections",
    tag = "Sections",
    request_body = CreateSectionRequest,
    responses(
        (status = 201, description = "Section created", body = SectionDto),
        (status = 409, description = "Slug already taken", body = ErrorResponse)
    )
)]
pub async fn create_section(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<CreateSectionRequest>,
) -> HttpResult<(StatusCode, Json<SectionDto>)> {
    let section = state
        .services
        .section_commands()
        .create_section(CreateSectionCommand {
            name: payload.name,
            slug: payload.slug,
        })
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(section)))
}

#[utoipa::path(
    get,
    path = "/api/v1/sections/{id}",
    tag = "Sections",
    params(("id" = i64, Path, description = "Section id")),
    responses(
        (status = 200, description = "Section", body = SectionDto),
        (status = 404, description = "Section not found", body = ErrorResponse)
    )
)]
pub async fn get_section(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<SectionDto>> {
    state
        .services
        .section_queries()
        .get_section(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/sections/{id}",
    tag = "Sections",
    params(("id" = i64, Path, description = "Section id")),
    request_body = UpdateSectionRequest,
    responses(
        (status = 200, description = "Section replaced", body = SectionDto),
        (status = 400, description = "Missing name", body = ErrorResponse),
        (status = 404, description = "Section not found", body = ErrorResponse)
    )
)]
pub async fn replace_section(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSectionRequest>,
) -> HttpResult<Json<SectionDto>> {
    update(state, id, false, payload).await
}

#[utoipa::path(
    patch,
    path = "/api/v1/sections/{id}",
    tag = "Sections",
    params(("id" = i64, Path, description = "Section id")),
    request_body = UpdateSectionRequest,
    responses(
        (status = 200, description = "Section updated", body = SectionDto),
        (status = 404, description = "Section not found", body = ErrorResponse)
    )
)]
pub async fn patch_section(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSectionRequest>,
) -> HttpResult<Json<SectionDto>> {
    update(state, id, true, payload).await
}

async fn update(
    state: HttpState,
    id: i64,
    partial: bool,
    payload: UpdateSectionRequest,
) -> HttpResult<Json<SectionDto>> {
    state
        .services
        .section_commands()
        .update_section(UpdateSectionCommand {
            id,
            partial,
            name: payload.name,
            slug: payload.slug,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/sections/{id}",
    tag = "Sections",
    params(("id" = i64, Path, description = "Section id")),
    responses(
        (status = 200, description = "Section deleted", body = StatusResponse),
        (status = 404, description = "Section not found", body = ErrorResponse),
        (status = 409, description = "Section still has articles", body = ErrorResponse)
    )
)]
pub async fn delete_section(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .section_commands()
        .delete_section(id)
        .await
        .into_http()?;
    Ok(Json(StatusResponse::deleted()))
}
