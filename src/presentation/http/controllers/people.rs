// src/presentation/http/controllers/people.rs
use super::{SearchParams, StatusResponse, nullable};
use crate::application::{
    commands::people::{CreatePersonCommand, UpdatePersonCommand},
    dto::{PersonDto, ResourcePage},
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
pub struct CreatePersonRequest {
    pub full_name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePersonRequest {
    pub full_name: Option<String>,
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/people",
    tag = "People",
    params(SearchParams),
    responses((status = 200, description = "People by full name", body = ResourcePage<PersonDto>))
)]
pub async fn list_people(
    Extension(state): Extension<HttpState>,
    Query(params): Query<SearchParams>,
) -> HttpResult<Json<ResourcePage<PersonDto>>> {
    let page = params.request();
    state
        .services
        .person_queries()
        .list_people(params.q, page)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/people",
    tag = "People",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Person created", body = PersonDto),
        (status = 400, description = "Invalid payload", body = ErrorResponse)
    )
)]
pub async fn create_person(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<CreatePersonRequest>,
) -> HttpResult<(StatusCode, Json<PersonDto>)> {
    let person = state
        .services
        .person_commands()
        .create_person(CreatePersonCommand {
            full_name: payload.full_name,
            slug: payload.slug,
            description: payload.description,
        })
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(person)))
}

#[utoipa::path(
    get,
    path = "/api/v1/people/{id}",
    tag = "People",
    params(("id" = i64, Path, description = "Person id")),
    responses(
        (status = 200, description = "Person", body = PersonDto),
        (status = 404, description = "Person not found", body = ErrorResponse)
    )
)]
pub async fn get_person(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<PersonDto>> {
    state
        .services
        .person_queries()
        .get_person(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/people/{id}",
    tag = "People",
    params(("id" = i64, Path, description = "Person id")),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Person replaced", body = PersonDto),
        (status = 400, description = "Missing full_name", body = ErrorResponse),
        (status = 404, description = "Person not found", body = ErrorResponse)
    )
)]
pub async fn replace_person(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePersonRequest>,
) -> HttpResult<Json<PersonDto>> {
    update(state, id, false, payload).await
}

#[utoipa::path(
    patch,
    path = "/api/v1/people/{id}",
    tag = "People",
    params(("id" = i64, Path, description = "Person id")),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Person updated", body = PersonDto),
        (status = 404, description = "Person not found", body = ErrorResponse)
    )
)]
pub async fn patch_person(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePersonRequest>,
) -> HttpResult<Json<PersonDto>> {
    update(state, id, true, payload).await
}

async fn update(
    state: HttpState,
    id: i64,
    partial: bool,
    payload: UpdatePersonRequest,
) -> HttpResult<Json<PersonDto>> {
    state
        .services
        .person_commands()
        .update_person(UpdatePersonCommand {
            id,
            partial,
            full_name: payload.full_name,
            slug: payload.slug,
            description: payload.description,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/people/{id}",
    tag = "People",
    params(("id" = i64, Path, description = "Person id")),
    responses(
        (status = 200, description = "Person deleted", body = StatusResponse),
        (status = 404, description = "Person not found", body = ErrorResponse)
    )
)]
pub async fn delete_person(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .person_commands()
        .delete_person(id)
        .await
        .into_http()?;
    Ok(Json(StatusResponse::deleted()))
}
