// src/presentation/http/controllers/layout.rs
use super::{SavedResponse, StatusResponse};
use crate::application::{
    commands::layout::{ClearSpotCommand, DeletePageCommand, SaveComponentCommand},
    dto::PageLayoutDto,
    queries::layout::PageDetailQuery,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::ComponentSubmission;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;

/// Placement address of a submission. The component's own fields travel
/// alongside these two keys, either form-encoded or as one JSON object.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ComponentSubmissionBody {
    pub component: String,
    pub spot: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/pages/{slug}/components",
    tag = "Layout",
    params(("slug" = String, Path, description = "Page slug")),
    responses(
        (status = 200, description = "Spots, component schemas and saved placements", body = PageLayoutDto)
    )
)]
pub async fn page_components(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<PageLayoutDto>> {
    state
        .services
        .layout_queries()
        .page_detail(PageDetailQuery { slug })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/pages/{slug}/components",
    tag = "Layout",
    params(("slug" = String, Path, description = "Page slug")),
    request_body(
        content = ComponentSubmissionBody,
        description = "`component`, `spot` and the component's own fields. In a form body an omitted boolean field is saved as `false`",
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 201, description = "Saved; the page was created", body = SavedResponse),
        (status = 200, description = "Saved on an existing page", body = SavedResponse),
        (status = 400, description = "Unknown component or spot, or invalid fields", body = ErrorResponse)
    )
)]
pub async fn save_component(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
    ComponentSubmission(submission, encoding): ComponentSubmission,
) -> HttpResult<(StatusCode, Json<SavedResponse>)> {
    let command = SaveComponentCommand::from_submission(slug, submission, encoding).into_http()?;
    let outcome = state
        .services
        .layout_commands()
        .save_component(command)
        .await
        .into_http()?;
    let status = if outcome.page_created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(SavedResponse { saved: true })))
}

#[utoipa::path(
    delete,
    path = "/api/v1/pages/{slug}/components/{spot}",
    tag = "Layout",
    params(
        ("slug" = String, Path, description = "Page slug"),
        ("spot" = String, Path, description = "Spot slug")
    ),
    responses(
        (status = 200, description = "Spot cleared", body = SavedResponse),
        (status = 404, description = "No such page or placement", body = ErrorResponse)
    )
)]
pub async fn clear_spot(
    Extension(state): Extension<HttpState>,
    Path((page_slug, spot)): Path<(String, String)>,
) -> HttpResult<Json<SavedResponse>> {
    state
        .services
        .layout_commands()
        .clear_spot(ClearSpotCommand { page_slug, spot })
        .await
        .into_http()?;
    Ok(Json(SavedResponse { saved: true }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/pages/{slug}",
    tag = "Layout",
    params(("slug" = String, Path, description = "Page slug")),
    responses(
        (status = 200, description = "Page and its placements deleted", body = StatusResponse),
        (status = 404, description = "No such page", body = ErrorResponse)
    )
)]
pub async fn delete_page(
    Extension(state): Extension<HttpState>,
    Path(page_slug): Path<String>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .layout_commands()
        .delete_page(DeletePageCommand { page_slug })
        .await
        .into_http()?;
    Ok(Json(StatusResponse::deleted()))
}
