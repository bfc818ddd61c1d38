// src/presentation/http/controllers/images.rs
use super::{StatusResponse, nullable};
use crate::application::{
    commands::images::{CreateImageCommand, UpdateImageCommand},
    dto::{ImageDto, PageRequest, ResourcePage},
    queries::images::ListImagesQuery,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::RequestIdentity;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ImageListParams {
    /// Case-insensitive substring of the title or filename.
    pub q: Option<String>,
    /// `created_at` or `-created_at` (default).
    pub ordering: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateImageRequest {
    pub title: Option<String>,
    pub filename: String,
    pub caption: Option<String>,
    /// Defaults to the requesting person when omitted.
    pub authors: Option<Vec<i64>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateImageRequest {
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub caption: Option<Option<String>>,
    pub authors: Option<Vec<i64>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/images",
    tag = "Images",
    params(ImageListParams),
    responses(
        (status = 200, description = "Images", body = ResourcePage<ImageDto>),
        (status = 400, description = "Unsupported ordering", body = ErrorResponse)
    )
)]
pub async fn list_images(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ImageListParams>,
) -> HttpResult<Json<ResourcePage<ImageDto>>> {
    let query = ListImagesQuery {
        q: params.q,
        ordering: params.ordering,
        page: PageRequest::new(params.limit, params.offset),
    };
    state
        .services
        .image_queries()
        .list_images(query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/images",
    tag = "Images",
    request_body = CreateImageRequest,
    params(("X-Person-Id" = Option<i64>, Header, description = "Requesting person")),
    responses(
        (status = 201, description = "Image created", body = ImageDto),
        (status = 400, description = "Invalid payload or unknown author", body = ErrorResponse)
    )
)]
pub async fn create_image(
    Extension(state): Extension<HttpState>,
    RequestIdentity(requester): RequestIdentity,
    Json(payload): Json<CreateImageRequest>,
) -> HttpResult<(StatusCode, Json<ImageDto>)> {
    let command = CreateImageCommand {
        title: payload.title,
        filename: payload.filename,
        caption: payload.caption,
        authors: payload.authors,
    };
    let image = state
        .services
        .image_commands()
        .create_image(requester, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(image)))
}

#[utoipa::path(
    get,
    path = "/api/v1/images/{id}",
    tag = "Images",
    params(("id" = i64, Path, description = "Image id")),
    responses(
        (status = 200, description = "Image", body = ImageDto),
        (status = 404, description = "Image not found", body = ErrorResponse)
    )
)]
pub async fn get_image(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<ImageDto>> {
    state
        .services
        .image_queries()
        .get_image(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/images/{id}",
    tag = "Images",
    params(("id" = i64, Path, description = "Image id")),
    request_body = UpdateImageRequest,
    responses(
        (status = 200, description = "Image replaced", body = ImageDto),
        (status = 400, description = "Missing filename", body = ErrorResponse),
        (status = 404, description = "Image not found", body = ErrorResponse)
    )
)]
pub async fn replace_image(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateImageRequest>,
) -> HttpResult<Json<ImageDto>> {
    update(state, id, false, payload).await
}

#[utoipa::path(
    patch,
    path = "/api/v1/images/{id}",
    tag = "Images",
    params(("id" = i64, Path, description = "Image id")),
    request_body = UpdateImageRequest,
    responses(
        (status = 200, description = "Image updated", body = ImageDto),
        (status = 404, description = "Image not found", body = ErrorResponse)
    )
)]
pub async fn patch_image(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateImageRequest>,
) -> HttpResult<Json<ImageDto>> {
    update(state, id, true, payload).await
}

async fn update(
    state: HttpState,
    id: i64,
    partial: bool,
    payload: UpdateImageRequest,
) -> HttpResult<Json<ImageDto>> {
    state
        .services
        .image_commands()
        .update_image(UpdateImageCommand {
            id,
            partial,
            title: payload.title,
            filename: payload.filename,
            caption: payload.caption,
            authors: payload.authors,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/images/{id}",
    tag = "Images",
    params(("id" = i64, Path, description = "Image id")),
    responses(
        (status = 200, description = "Image deleted", body = StatusResponse),
        (status = 404, description = "Image not found", body = ErrorResponse)
    )
)]
pub async fn delete_image(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .image_commands()
        .delete_image(id)
        .await
        .into_http()?;
    Ok(Json(StatusResponse::deleted()))
}
