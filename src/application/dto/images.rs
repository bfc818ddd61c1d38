use crate::domain::image::{Image, ImageAttachment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageDto {
    pub id: i64,
    pub title: Option<String>,
    pub filename: String,
    pub caption: Option<String>,
    pub authors: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Image> for ImageDto {
    fn from(image: Image) -> Self {
        Self {
            id: image.id.into(),
            title: image.title,
            filename: image.filename,
            caption: image.caption,
            authors: image.authors.into_iter().map(i64::from).collect(),
            created_at: image.created_at,
            updated_at: image.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageAttachmentDto {
    pub id: i64,
    pub article_id: i64,
    pub image: ImageDto,
    pub caption: Option<String>,
    pub credit: Option<String>,
    pub order: i32,
}

impl From<ImageAttachment> for ImageAttachmentDto {
    fn from(attachment: ImageAttachment) -> Self {
        Self {
            id: attachment.id.into(),
            article_id: attachment.article_id.into(),
            image: attachment.image.into(),
            caption: attachment.caption,
            credit: attachment.credit,
            order: attachment.position,
        }
    }
}
