//! Field definitions for layout components.
//!
//! A component's configurable inputs are a list of [`FieldDefinition`]s. Each
//! definition knows how to describe itself as schema JSON and how to clean a
//! raw submitted value into the stored representation. Form submissions only
//! ever carry strings, so cleaning accepts both typed JSON and string forms.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Char {
        #[serde(default)]
        max_length: Option<usize>,
    },
    Text,
    Integer {
        #[serde(default)]
        min: Option<i64>,
        #[serde(default)]
        max: Option<i64>,
    },
    Boolean,
    Select {
        options: Vec<SelectOption>,
    },
    Article {
        #[serde(default)]
        many: bool,
    },
    Image {
        #[serde(default)]
        many: bool,
    },
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Char { .. } => "char",
            Self::Text => "text",
            Self::Integer { .. } => "integer",
            Self::Boolean => "boolean",
            Self::Select { .. } => "select",
            Self::Article { .. } => "article",
            Self::Image { .. } => "image",
        }
    }

    /// Whether the field stores a list of references.
    pub fn takes_many(&self) -> bool {
        matches!(self, Self::Article { many: true } | Self::Image { many: true })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<Value>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            default: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Value used when nothing was submitted or stored for this field.
    pub fn initial_value(&self) -> Value {
        self.default.clone().unwrap_or(Value::Null)
    }

    /// Schema entry for edit forms: `{type, label, required, default, ...constraints}`.
    pub fn to_schema(&self) -> Value {
        let mut entry = Map::new();
        entry.insert("type".into(), json!(self.kind.type_name()));
        entry.insert("label".into(), json!(self.label));
        entry.insert("required".into(), json!(self.required));
        entry.insert("default".into(), self.initial_value());
        match &self.kind {
            FieldKind::Char { max_length } => {
                if let Some(max_length) = max_length {
                    entry.insert("max_length".into(), json!(max_length));
                }
            }
            FieldKind::Integer { min, max } => {
                if let Some(min) = min {
                    entry.insert("min".into(), json!(min));
                }
                if let Some(max) = max {
                    entry.insert("max".into(), json!(max));
                }
            }
            FieldKind::Select { options } => {
                entry.insert("options".into(), json!(options));
            }
            FieldKind::Article { many } | FieldKind::Image { many } => {
                entry.insert("many".into(), json!(many));
            }
            FieldKind::Text | FieldKind::Boolean => {}
        }
        Value::Object(entry)
    }

    /// Normalise a raw value into its stored form, or explain why it is invalid.
    pub fn clean(&self, raw: Option<&Value>) -> Result<Value, String> {
        let raw = match raw {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(value) => Some(value),
        };

        let Some(raw) = raw else {
            if self.required {
                return Err("this field is required".into());
            }
            return Ok(self.initial_value());
        };

        match &self.kind {
            FieldKind::Char { max_length } => {
                let text = expect_string(raw)?;
                if let Some(max) = max_length {
                    if text.chars().count() > *max {
                        return Err(format!("must be at most {max} characters"));
                    }
                }
                Ok(Value::String(text))
            }
            FieldKind::Text => expect_string(raw).map(Value::String),
            FieldKind::Integer { min, max } => {
                let number = parse_integer(raw)?;
                if let Some(min) = min {
                    if number < *min {
                        return Err(format!("must be at least {min}"));
                    }
                }
                if let Some(max) = max {
                    if number > *max {
                        return Err(format!("must be at most {max}"));
                    }
                }
                Ok(json!(number))
            }
            FieldKind::Boolean => parse_bool(raw).map(Value::Bool),
            FieldKind::Select { options } => {
                let choice = expect_string(raw)?;
                if options.iter().any(|option| option.value == choice) {
                    Ok(Value::String(choice))
                } else {
                    Err(format!("'{choice}' is not a valid choice"))
                }
            }
            FieldKind::Article { many } | FieldKind::Image { many } => {
                let ids = parse_ids(raw)?;
                if *many {
                    Ok(json!(ids))
                } else {
                    match ids.as_slice() {
                        [id] => Ok(json!(id)),
                        _ => Err("expected a single id".into()),
                    }
                }
            }
        }
    }
}

fn expect_string(raw: &Value) -> Result<String, String> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        _ => Err("expected a string".into()),
    }
}

fn parse_integer(raw: &Value) -> Result<i64, String> {
    match raw {
        Value::Number(n) => n.as_i64().ok_or_else(|| "expected an integer".to_string()),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| "expected an integer".to_string()),
        _ => Err("expected an integer".into()),
    }
}

fn parse_bool(raw: &Value) -> Result<bool, String> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => Ok(true),
            "false" | "0" | "off" | "no" => Ok(false),
            _ => Err("expected a boolean".into()),
        },
        _ => Err("expected a boolean".into()),
    }
}

fn parse_ids(raw: &Value) -> Result<Vec<i64>, String> {
    let ids = match raw {
        Value::Array(items) => items
            .iter()
            .map(parse_integer)
            .collect::<Result<Vec<_>, _>>()?,
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<i64>().map_err(|_| "expected an id".to_string()))
            .collect::<Result<Vec<_>, _>>()?,
        other => vec![parse_integer(other)?],
    };

    if ids.iter().any(|id| *id <= 0) {
        return Err("ids must be positive".into());
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_field(max: usize) -> FieldDefinition {
        FieldDefinition::new("headline", "Headline", FieldKind::Char {
            max_length: Some(max),
        })
    }

    #[test]
    fn missing_optional_field_uses_default() {
        let field = FieldDefinition::new("count", "Count", FieldKind::Integer {
            min: None,
            max: None,
        })
        .with_default(json!(3));
        assert_eq!(field.clean(None).unwrap(), json!(3));
        assert_eq!(field.clean(Some(&json!(""))).unwrap(), json!(3));
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let field = char_field(10).required();
        assert_eq!(field.clean(None).unwrap_err(), "this field is required");
        assert!(field.clean(Some(&json!("   "))).is_err());
    }

    #[test]
    fn char_field_enforces_max_length() {
        let field = char_field(5);
        assert!(field.clean(Some(&json!("short"))).is_ok());
        assert_eq!(
            field.clean(Some(&json!("too long"))).unwrap_err(),
            "must be at most 5 characters"
        );
    }

    #[test]
    fn integer_field_accepts_form_strings_and_checks_bounds() {
        let field = FieldDefinition::new("count", "Count", FieldKind::Integer {
            min: Some(1),
            max: Some(10),
        });
        assert_eq!(field.clean(Some(&json!("7"))).unwrap(), json!(7));
        assert_eq!(field.clean(Some(&json!(0))).unwrap_err(), "must be at least 1");
        assert!(field.clean(Some(&json!("seven"))).is_err());
    }

    #[test]
    fn boolean_field_understands_checkbox_values() {
        let field = FieldDefinition::new("dark", "Dark", FieldKind::Boolean);
        assert_eq!(field.clean(Some(&json!("on"))).unwrap(), json!(true));
        assert_eq!(field.clean(Some(&json!("0"))).unwrap(), json!(false));
        assert!(field.clean(Some(&json!("maybe"))).is_err());
    }

    #[test]
    fn select_field_requires_a_known_option() {
        let field = FieldDefinition::new("layout", "Layout", FieldKind::Select {
            options: vec![SelectOption {
                value: "wide".into(),
                label: "Wide".into(),
            }],
        });
        assert_eq!(field.clean(Some(&json!("wide"))).unwrap(), json!("wide"));
        assert!(field.clean(Some(&json!("narrow"))).is_err());
    }

    #[test]
    fn reference_fields_parse_ids() {
        let many = FieldDefinition::new("articles", "Articles", FieldKind::Article { many: true });
        assert_eq!(many.clean(Some(&json!("3, 4,5"))).unwrap(), json!([3, 4, 5]));
        assert_eq!(many.clean(Some(&json!([1, "2"]))).unwrap(), json!([1, 2]));

        let single = FieldDefinition::new("image", "Image", FieldKind::Image { many: false });
        assert_eq!(single.clean(Some(&json!("9"))).unwrap(), json!(9));
        assert!(single.clean(Some(&json!("1,2"))).is_err());
        assert!(single.clean(Some(&json!(-4))).is_err());
    }

    #[test]
    fn schema_includes_constraints() {
        let schema = char_field(40).required().to_schema();
        assert_eq!(schema["type"], "char");
        assert_eq!(schema["required"], true);
        assert_eq!(schema["max_length"], 40);
        assert_eq!(schema["default"], Value::Null);
    }

    #[test]
    fn definition_deserializes_from_theme_json() {
        let field: FieldDefinition = serde_json::from_value(json!({
            "name": "count",
            "label": "Count",
            "type": "integer",
            "max": 5,
            "required": true
        }))
        .unwrap();
        assert_eq!(field.kind, FieldKind::Integer { min: None, max: Some(5) });
        assert!(field.required);
    }
}
