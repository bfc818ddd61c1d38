// src/presentation/http/extractors.rs
use crate::domain::layout::{FieldData, SubmissionEncoding, registry::RESERVED_FIELDS};
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{HeaderName, HeaderValue, StatusCode, header::CONTENT_TYPE, request::Parts},
};
use headers::{Header, HeaderMapExt};
use serde_json::Value;

use super::error::HttpError;

static X_PERSON_ID: HeaderName = HeaderName::from_static("x-person-id");

/// `X-Person-Id`: the person acting on behalf of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonIdHeader(pub i64);

impl Header for PersonIdHeader {
    fn name() -> &'static HeaderName {
        &X_PERSON_ID
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(headers::Error::invalid)?;
        value
            .to_str()
            .ok()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or_else(headers::Error::invalid)
    }

    fn encode<E>(&self, values: &mut E)
    where
        E: Extend<HeaderValue>,
    {
        values.extend(std::iter::once(HeaderValue::from(self.0)));
    }
}

/// The requesting person, when the caller identified one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdentity(pub Option<i64>);

impl<S> FromRequestParts<S> for RequestIdentity
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(&X_PERSON_ID) {
            return Ok(Self(None));
        }
        parts
            .headers
            .typed_get::<PersonIdHeader>()
            .map(|header| Self(Some(header.0)))
            .ok_or_else(|| HttpError::bad_request("X-Person-Id must be a positive integer"))
    }
}

/// A component submission, accepted either form-encoded or as a JSON object.
///
/// Form values arrive as strings. A key repeated in the form is collected
/// into an array so multi-reference fields can be posted as
/// `articles=1&articles=2`; the component decides how to read it.
#[derive(Debug, Clone)]
pub struct ComponentSubmission(pub FieldData, pub SubmissionEncoding);

impl<S> FromRequest<S> for ComponentSubmission
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase());

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|err| HttpError::bad_request(format!("unreadable request body: {err}")))?;

        match content_type.as_deref() {
            Some("application/json") => {
                parse_json(&body).map(|data| Self(data, SubmissionEncoding::Json))
            }
            Some("application/x-www-form-urlencoded") | None => {
                parse_form(&body).map(|data| Self(data, SubmissionEncoding::Form))
            }
            Some(other) => Err(HttpError::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("unsupported content type '{other}'"),
            )),
        }
    }
}

fn parse_json(body: &[u8]) -> Result<FieldData, HttpError> {
    if body.is_empty() {
        return Ok(FieldData::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(HttpError::bad_request("submission must be a JSON object")),
        Err(err) => Err(HttpError::bad_request(format!("malformed JSON: {err}"))),
    }
}

fn parse_form(body: &[u8]) -> Result<FieldData, HttpError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
        .map_err(|err| HttpError::bad_request(format!("malformed form body: {err}")))?;

    let mut data = FieldData::new();
    for (key, value) in pairs {
        let value = Value::String(value);
        if RESERVED_FIELDS.contains(&key.as_str()) {
            data.insert(key, value);
            continue;
        }
        match data.get_mut(&key) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                data.insert(key, value);
            }
        }
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    #[test]
    fn form_submissions_collect_repeated_keys() {
        let data = parse_form(
            b"component=article_list&spot=main&spot=sidebar&articles=3&articles=7&articles=8",
        )
        .unwrap();
        assert_eq!(data["component"], "article_list");
        assert_eq!(data["spot"], "sidebar");
        assert_eq!(data["articles"], serde_json::json!(["3", "7", "8"]));
    }

    #[test]
    fn json_submission_must_be_an_object() {
        assert!(parse_json(b"[1, 2]").is_err());
        assert!(parse_json(b"").unwrap().is_empty());
        let data = parse_json(br#"{"component": "promo", "count": 2}"#).unwrap();
        assert_eq!(data["count"], 2);
    }

    #[test]
    fn person_header_requires_positive_id() {
        let mut headers = HeaderMap::new();
        headers.insert("x-person-id", HeaderValue::from_static("42"));
        assert_eq!(headers.typed_get::<PersonIdHeader>(), Some(PersonIdHeader(42)));

        headers.insert("x-person-id", HeaderValue::from_static("-1"));
        assert_eq!(headers.typed_get::<PersonIdHeader>(), None);
    }
}
