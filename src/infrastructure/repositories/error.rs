use crate::domain::errors::DomainError;

const CNT_ARTICLE_SLUG: &str = "articles_slug_key";
const CNT_ARTICLE_SECTION: &str = "articles_section_id_fkey";
const CNT_ARTICLE_PUBLISHED_CHECK: &str = "articles_published_requires_timestamp_chk";
const CNT_ARTICLE_IMPORTANCE_CHECK: &str = "articles_importance_chk";
const CNT_SECTION_SLUG: &str = "sections_slug_key";
const CNT_TAG_NAME: &str = "tags_name_key";
const CNT_PAGE_SLUG: &str = "pages_slug_key";
const CNT_PAGE_SPOT: &str = "page_components_page_spot_key";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_ARTICLE_SLUG => DomainError::Conflict("slug already exists".into()),
                    CNT_SECTION_SLUG => {
                        DomainError::Conflict("section slug already exists".into())
                    }
                    CNT_TAG_NAME => DomainError::Conflict("tag already exists".into()),
                    CNT_PAGE_SLUG => DomainError::Conflict("page already exists".into()),
                    CNT_PAGE_SPOT => {
                        DomainError::Conflict("spot already holds a component".into())
                    }
                    CNT_ARTICLE_SECTION => {
                        DomainError::Conflict("section is referenced by articles".into())
                    }
                    CNT_ARTICLE_PUBLISHED_CHECK => {
                        DomainError::Validation("published articles require published_at".into())
                    }
                    CNT_ARTICLE_IMPORTANCE_CHECK => {
                        DomainError::Validation("importance must be between 1 and 5".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_persistence_failures() {
        let err = map_sqlx(sqlx::Error::RowNotFound);
        assert!(matches!(err, DomainError::Persistence(_)));
    }
}
