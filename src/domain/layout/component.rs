use crate::domain::errors::{DomainError, DomainResult, FieldErrors};
use crate::domain::layout::fields::{FieldDefinition, FieldKind};
use crate::domain::layout::value_objects::{ComponentSlug, SpotId};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Field name to value, as saved for a placement.
pub type FieldData = Map<String, Value>;

/// A registered component class.
pub type ComponentClass = Arc<dyn Component>;

/// How a submission body was encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEncoding {
    Json,
    /// Every value is a string, a repeated key arrives as an array and an
    /// unchecked checkbox is left out of the body.
    Form,
}

/// Capability interface every themeable content block implements.
///
/// Implementations only need to describe themselves; schema serialization,
/// restoring saved data and building validated instances have default
/// implementations driven by [`Component::fields`]. Override [`Component::validate`]
/// for rules that span several fields.
pub trait Component: Send + Sync + fmt::Debug {
    fn slug(&self) -> &ComponentSlug;

    fn name(&self) -> &str;

    fn spots(&self) -> &[SpotId];

    fn fields(&self) -> &[FieldDefinition];

    fn allows_spot(&self, spot: &SpotId) -> bool {
        self.spots().contains(spot)
    }

    fn schema(&self) -> Value {
        let entries = self
            .fields()
            .iter()
            .map(|field| (field.name.clone(), field.to_schema()))
            .collect::<Map<_, _>>();
        Value::Object(entries)
    }

    /// Cross-field checks run after every field has been cleaned.
    fn validate(&self, _data: &FieldData) -> Result<(), FieldErrors> {
        Ok(())
    }

    /// Values for display: stored data projected onto the current field list.
    /// Fields added to the theme after the data was saved fall back to their defaults.
    fn restore(&self, stored: &FieldData) -> FieldData {
        self.fields()
            .iter()
            .map(|field| {
                let value = stored
                    .get(&field.name)
                    .cloned()
                    .unwrap_or_else(|| field.initial_value());
                (field.name.clone(), value)
            })
            .collect()
    }

    /// Reshape a form body into the values [`Component::build`] expects. A
    /// repeated key keeps its last value unless the field takes many
    /// references, and an absent boolean reads as `false`.
    fn normalize_form(&self, mut submission: FieldData) -> FieldData {
        for field in self.fields() {
            if let Some(value) = submission.get_mut(&field.name) {
                if let Value::Array(items) = value {
                    if !field.kind.takes_many() {
                        let last = items.pop().unwrap_or(Value::Null);
                        *value = last;
                    }
                }
            } else if matches!(field.kind, FieldKind::Boolean) {
                submission.insert(field.name.clone(), Value::Bool(false));
            }
        }
        submission
    }

    /// Clean `submission` on top of `base` (previously stored data, if any).
    /// Fields missing from the submission keep their base value. Form bodies
    /// go through [`Component::normalize_form`] first.
    fn build(&self, base: Option<&FieldData>, submission: &FieldData) -> DomainResult<FieldData> {
        let mut cleaned = FieldData::new();
        let mut errors = FieldErrors::new();

        for field in self.fields() {
            let raw = submission
                .get(&field.name)
                .or_else(|| base.and_then(|stored| stored.get(&field.name)));
            match field.clean(raw) {
                Ok(value) => {
                    cleaned.insert(field.name.clone(), value);
                }
                Err(message) => {
                    errors.insert(field.name.clone(), message);
                }
            }
        }

        if errors.is_empty() {
            if let Err(cross_field) = self.validate(&cleaned) {
                errors = cross_field;
            }
        }

        if errors.is_empty() {
            Ok(cleaned)
        } else {
            Err(DomainError::InvalidFields(errors))
        }
    }
}

/// A component class paired with field data, built for a single request.
#[derive(Debug, Clone)]
pub struct ComponentInstance {
    class: ComponentClass,
    data: FieldData,
}

impl ComponentInstance {
    /// Instance holding only default values.
    pub fn empty(class: ComponentClass) -> Self {
        let data = class.restore(&FieldData::new());
        Self { class, data }
    }

    /// Instance reconstructed from a placement's stored data.
    pub fn from_stored(class: ComponentClass, stored: &FieldData) -> Self {
        let data = class.restore(stored);
        Self { class, data }
    }

    /// Validated instance from a submission, optionally layered over stored data.
    pub fn from_submission(
        class: ComponentClass,
        base: Option<&FieldData>,
        submission: &FieldData,
    ) -> DomainResult<Self> {
        let data = class.build(base, submission)?;
        Ok(Self { class, data })
    }

    pub fn slug(&self) -> &ComponentSlug {
        self.class.slug()
    }

    pub fn fields_as_json(&self) -> Value {
        self.class.schema()
    }

    pub fn data_as_json(&self) -> Value {
        Value::Object(self.data.clone())
    }

    pub fn into_data(self) -> FieldData {
        self.data
    }
}

/// Component defined entirely by theme configuration.
#[derive(Debug, Clone)]
pub struct SchemaComponent {
    slug: ComponentSlug,
    name: String,
    spots: Vec<SpotId>,
    fields: Vec<FieldDefinition>,
}

impl SchemaComponent {
    pub fn new(
        slug: ComponentSlug,
        name: impl Into<String>,
        spots: Vec<SpotId>,
        fields: Vec<FieldDefinition>,
    ) -> Self {
        Self {
            slug,
            name: name.into(),
            spots,
            fields,
        }
    }
}

impl Component for SchemaComponent {
    fn slug(&self) -> &ComponentSlug {
        &self.slug
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn spots(&self) -> &[SpotId] {
        &self.spots
    }

    fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headline_block() -> ComponentClass {
        Arc::new(SchemaComponent::new(
            ComponentSlug::new("headline-block").unwrap(),
            "Headline block",
            vec![SpotId::new("hero").unwrap()],
            vec![
                FieldDefinition::new("headline", "Headline", FieldKind::Char {
                    max_length: Some(80),
                })
                .required(),
                FieldDefinition::new("count", "Count", FieldKind::Integer {
                    min: Some(1),
                    max: Some(5),
                })
                .with_default(json!(3)),
            ],
        ))
    }

    fn data(value: Value) -> FieldData {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn empty_instance_exposes_defaults() {
        let instance = ComponentInstance::empty(headline_block());
        assert_eq!(
            instance.data_as_json(),
            json!({ "headline": null, "count": 3 })
        );
    }

    #[test]
    fn submission_is_cleaned_and_unknown_keys_dropped() {
        let instance = ComponentInstance::from_submission(
            headline_block(),
            None,
            &data(json!({ "headline": "Election night", "count": "2", "spot": "hero" })),
        )
        .unwrap();
        assert_eq!(
            instance.data_as_json(),
            json!({ "headline": "Election night", "count": 2 })
        );
    }

    #[test]
    fn submission_inherits_base_values() {
        let base = data(json!({ "headline": "Old", "count": 4 }));
        let instance = ComponentInstance::from_submission(
            headline_block(),
            Some(&base),
            &data(json!({ "headline": "New" })),
        )
        .unwrap();
        assert_eq!(instance.data_as_json(), json!({ "headline": "New", "count": 4 }));
    }

    #[test]
    fn invalid_submission_reports_every_field() {
        let err = ComponentInstance::from_submission(
            headline_block(),
            None,
            &data(json!({ "count": "9" })),
        )
        .unwrap_err();
        match err {
            DomainError::InvalidFields(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.contains_key("headline"));
                assert!(errors.contains_key("count"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn form_body_keeps_last_scalar_and_every_reference() {
        let class: ComponentClass = Arc::new(SchemaComponent::new(
            ComponentSlug::new("reading-list").unwrap(),
            "Reading list",
            vec![],
            vec![
                FieldDefinition::new("title", "Title", FieldKind::Char { max_length: None }),
                FieldDefinition::new("articles", "Articles", FieldKind::Article { many: true }),
                FieldDefinition::new("visible", "Visible", FieldKind::Boolean)
                    .with_default(json!(true)),
            ],
        ));
        let form = data(json!({ "title": ["a", "b"], "articles": ["4", "9"] }));
        let normalized = class.normalize_form(form);
        assert_eq!(
            normalized,
            data(json!({ "title": "b", "articles": ["4", "9"], "visible": false }))
        );

        let base = data(json!({ "title": "Kept", "articles": [1], "visible": true }));
        let rebuilt = class
            .build(Some(&base), &class.normalize_form(data(json!({ "title": "New" }))))
            .unwrap();
        assert_eq!(rebuilt["visible"], false);
        assert_eq!(rebuilt["articles"], json!([1]));
    }

    #[test]
    fn restore_fills_fields_added_after_save() {
        let instance =
            ComponentInstance::from_stored(headline_block(), &data(json!({ "headline": "Kept" })));
        assert_eq!(instance.data_as_json(), json!({ "headline": "Kept", "count": 3 }));
    }

    #[derive(Debug)]
    struct PairedLinks {
        slug: ComponentSlug,
        fields: Vec<FieldDefinition>,
    }

    impl Component for PairedLinks {
        fn slug(&self) -> &ComponentSlug {
            &self.slug
        }

        fn name(&self) -> &str {
            "Paired links"
        }

        fn spots(&self) -> &[SpotId] {
            &[]
        }

        fn fields(&self) -> &[FieldDefinition] {
            &self.fields
        }

        fn validate(&self, data: &FieldData) -> Result<(), FieldErrors> {
            let url = data.get("url").is_some_and(|v| !v.is_null());
            let label = data.get("label").is_some_and(|v| !v.is_null());
            if url == label {
                return Ok(());
            }
            let mut errors = FieldErrors::new();
            errors.insert("label".into(), "url and label must be set together".into());
            Err(errors)
        }
    }

    #[test]
    fn custom_component_can_validate_across_fields() {
        let class: ComponentClass = Arc::new(PairedLinks {
            slug: ComponentSlug::new("links").unwrap(),
            fields: vec![
                FieldDefinition::new("url", "URL", FieldKind::Text),
                FieldDefinition::new("label", "Label", FieldKind::Text),
            ],
        });
        let err = class
            .build(None, &data(json!({ "url": "https://example.com" })))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidFields(_)));
        assert!(class.build(None, &data(json!({}))).is_ok());
    }
}
