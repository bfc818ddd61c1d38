// src/presentation/http/controllers/articles.rs
use super::{PageParams, StatusResponse, nullable};
use crate::application::{
    commands::{
        articles::{CreateArticleCommand, DeleteArticleCommand, UpdateArticleCommand},
        images::AttachImageCommand,
    },
    dto::{ArticleDto, ArticleRevisionDto, ImageAttachmentDto, PageRequest, ResourcePage},
    queries::articles::{
        GetArticleByIdQuery, GetArticleRevisionQuery, ListArticlesQuery, ListAttachmentsQuery,
    },
};
use crate::presentation::http::error::{ErrorResponse, HttpError, HttpResult, IntoHttpResult};
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
pub struct ArticleListParams {
    /// Case-insensitive substring of the long headline.
    pub q: Option<String>,
    /// Exact tag name.
    pub tag: Option<String>,
    pub topic: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub long_headline: String,
    pub short_headline: Option<String>,
    /// Generated from the headline when omitted.
    pub slug: Option<String>,
    pub snippet: Option<String>,
    #[serde(default)]
    pub content: String,
    pub section_id: i64,
    #[serde(default)]
    pub authors: Vec<i64>,
    #[serde(default)]
    pub tags: Vec<i64>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub importance: Option<i64>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    pub long_headline: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub short_headline: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub snippet: Option<Option<String>>,
    pub content: Option<String>,
    pub section_id: Option<i64>,
    pub authors: Option<Vec<i64>>,
    pub tags: Option<Vec<i64>>,
    pub topics: Option<Vec<String>>,
    pub importance: Option<i64>,
    pub is_published: Option<bool>,
}

impl UpdateArticleRequest {
    fn into_command(self, id: i64, partial: bool) -> UpdateArticleCommand {
        UpdateArticleCommand {
            id,
            partial,
            headline: self.long_headline,
            short_headline: self.short_headline,
            snippet: self.snippet,
            content: self.content,
            section_id: self.section_id,
            authors: self.authors,
            tags: self.tags,
            topics: self.topics,
            importance: self.importance,
            publish: self.is_published,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RevisionParams {
    pub revision_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachImageRequest {
    pub image_id: i64,
    pub caption: Option<String>,
    pub credit: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttachmentListParams {
    pub article_id: Option<i64>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/v1/articles",
    tag = "Articles",
    params(ArticleListParams),
    responses((status = 200, description = "Articles, newest first", body = ResourcePage<ArticleDto>))
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ArticleListParams>,
) -> HttpResult<Json<ResourcePage<ArticleDto>>> {
    let query = ListArticlesQuery {
        q: params.q,
        tag: params.tag,
        topic: params.topic,
        page: PageRequest::new(params.limit, params.offset),
    };
    state
        .services
        .article_queries()
        .list_articles(query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles",
    tag = "Articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article created", body = ArticleDto),
        (status = 400, description = "Invalid payload or unknown reference", body = ErrorResponse),
        (status = 409, description = "Slug already taken", body = ErrorResponse)
    )
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<CreateArticleRequest>,
) -> HttpResult<(StatusCode, Json<ArticleDto>)> {
    let command = CreateArticleCommand {
        headline: payload.long_headline,
        short_headline: payload.short_headline,
        slug: payload.slug,
        snippet: payload.snippet,
        content: payload.content,
        section_id: payload.section_id,
        authors: payload.authors,
        tags: payload.tags,
        topics: payload.topics,
        importance: payload.importance,
        publish: payload.is_published,
    };
    let article = state
        .services
        .article_commands()
        .create_article(command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(article)))
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}",
    tag = "Articles",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article", body = ArticleDto),
        (status = 404, description = "Article not found", body = ErrorResponse)
    )
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries()
        .get_article(GetArticleByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/articles/{id}",
    tag = "Articles",
    params(("id" = i64, Path, description = "Article id")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Article replaced", body = ArticleDto),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 404, description = "Article not found", body = ErrorResponse)
    )
)]
pub async fn replace_article(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    update(state, payload.into_command(id, false)).await
}

#[utoipa::path(
    patch,
    path = "/api/v1/articles/{id}",
    tag = "Articles",
    params(("id" = i64, Path, description = "Article id")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Article updated", body = ArticleDto),
        (status = 404, description = "Article not found", body = ErrorResponse)
    )
)]
pub async fn patch_article(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    update(state, payload.into_command(id, true)).await
}

async fn update(state: HttpState, command: UpdateArticleCommand) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands()
        .update_article(command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/articles/{id}",
    tag = "Articles",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article deleted", body = StatusResponse),
        (status = 404, description = "Article not found", body = ErrorResponse)
    )
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .article_commands()
        .delete_article(DeleteArticleCommand { id })
        .await
        .into_http()?;
    Ok(Json(StatusResponse::deleted()))
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}/revision",
    tag = "Articles",
    params(("id" = i64, Path, description = "Article id"), RevisionParams),
    responses(
        (status = 200, description = "Stored revision snapshot", body = ArticleRevisionDto),
        (status = 400, description = "revision_id missing", body = ErrorResponse),
        (status = 404, description = "Article or revision not found", body = ErrorResponse)
    )
)]
pub async fn get_revision(
    Extension(state): Extension<HttpState>,
    Path(article_id): Path<i64>,
    Query(params): Query<RevisionParams>,
) -> HttpResult<Json<ArticleRevisionDto>> {
    let revision_id = params
        .revision_id
        .ok_or_else(|| HttpError::bad_request("revision_id is required"))?;
    state
        .services
        .article_queries()
        .get_revision(GetArticleRevisionQuery {
            article_id,
            revision_id,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}/revisions",
    tag = "Articles",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Revisions, newest first", body = Vec<ArticleRevisionDto>),
        (status = 404, description = "Article not found", body = ErrorResponse)
    )
)]
pub async fn list_revisions(
    Extension(state): Extension<HttpState>,
    Path(article_id): Path<i64>,
) -> HttpResult<Json<Vec<ArticleRevisionDto>>> {
    state
        .services
        .article_queries()
        .list_revisions(article_id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}/attachments",
    tag = "Attachments",
    params(("id" = i64, Path, description = "Article id"), PageParams),
    responses(
        (status = 200, description = "Images attached to the article", body = ResourcePage<ImageAttachmentDto>),
        (status = 404, description = "Article not found", body = ErrorResponse)
    )
)]
pub async fn article_attachments(
    Extension(state): Extension<HttpState>,
    Path(article_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<ResourcePage<ImageAttachmentDto>>> {
    list_attachments_for(state, Some(article_id), params.request()).await
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/{id}/attachments",
    tag = "Attachments",
    params(("id" = i64, Path, description = "Article id")),
    request_body = AttachImageRequest,
    responses(
        (status = 201, description = "Image attached", body = ImageAttachmentDto),
        (status = 400, description = "Unknown image", body = ErrorResponse),
        (status = 404, description = "Article not found", body = ErrorResponse)
    )
)]
pub async fn attach_image(
    Extension(state): Extension<HttpState>,
    Path(article_id): Path<i64>,
    Json(payload): Json<AttachImageRequest>,
) -> HttpResult<(StatusCode, Json<ImageAttachmentDto>)> {
    let command = AttachImageCommand {
        article_id,
        image_id: payload.image_id,
        caption: payload.caption,
        credit: payload.credit,
    };
    let attachment = state
        .services
        .image_commands()
        .attach_image(command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(attachment)))
}

#[utoipa::path(
    get,
    path = "/api/v1/attachments",
    tag = "Attachments",
    params(AttachmentListParams),
    responses((status = 200, description = "Image attachments", body = ResourcePage<ImageAttachmentDto>))
)]
pub async fn list_attachments(
    Extension(state): Extension<HttpState>,
    Query(params): Query<AttachmentListParams>,
) -> HttpResult<Json<ResourcePage<ImageAttachmentDto>>> {
    let page = PageRequest::new(params.limit, params.offset);
    list_attachments_for(state, params.article_id, page).await
}

async fn list_attachments_for(
    state: HttpState,
    article_id: Option<i64>,
    page: PageRequest,
) -> HttpResult<Json<ResourcePage<ImageAttachmentDto>>> {
    state
        .services
        .article_queries()
        .list_attachments(ListAttachmentsQuery { article_id, page })
        .await
        .into_http()
        .map(Json)
}
