//! Request payloads and field-level validation
//!
//! Bodies arrive as a raw [`JsonPayload`] and are decoded only after the
//! target post has been found and the caller cleared to act on it. Decoding
//! reads fields one at a time, so a missing or mistyped field is reported as
//! a field error instead of a JSON rejection. Text is trimmed before
//! validation, so a whitespace-only value counts as blank.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// Maximum post title length (characters)
pub const TITLE_MAX_LEN: u64 = 255;

// ============================================================================
// FieldErrors
// ============================================================================

/// Field name -> list of human readable problems
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[schema(example = json!({"title": ["This field is required."]}))]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            for err in errs {
                out.add(field.to_string(), describe(err));
            }
        }
        out
    }
}

/// Render a validator error the way API clients expect to read it
fn describe(err: &validator::ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    match err.code.as_ref() {
        "required" => "This field is required.".to_string(),
        "email" => "Enter a valid email address.".to_string(),
        "length" => {
            let actual = err
                .params
                .get("value")
                .and_then(|v| v.as_str())
                .map(|s| s.chars().count() as u64)
                .unwrap_or(0);
            let min = err.params.get("min").and_then(|v| v.as_u64());
            let max = err.params.get("max").and_then(|v| v.as_u64());
            match (min, max) {
                (_, _) if actual == 0 => "This field may not be blank.".to_string(),
                (Some(min), _) if actual < min => {
                    format!("Ensure this field has at least {} characters.", min)
                }
                (_, Some(max)) => format!("Ensure this field has no more than {} characters.", max),
                _ => "Invalid length.".to_string(),
            }
        }
        other => format!("Invalid value ({})", other),
    }
}

/// Trim surrounding whitespace in place
pub(crate) fn trim_in_place(value: &mut Option<String>) {
    if let Some(s) = value.as_mut() {
        let trimmed = s.trim();
        if trimmed.len() != s.len() {
            *s = trimmed.to_string();
        }
    }
}

/// Normalize then validate a payload, returning the cleaned value
pub fn clean<T: Normalize + Validate>(mut input: T) -> Result<T, FieldErrors> {
    input.normalize();
    input.validate().map_err(FieldErrors::from)?;
    Ok(input)
}

/// Payloads that tidy their own fields before validation
pub trait Normalize {
    fn normalize(&mut self);
}

// ============================================================================
// JsonPayload
// ============================================================================

/// Key for errors that belong to the body as a whole
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Undecoded JSON request body
#[derive(Debug, Clone, Default)]
pub struct JsonPayload(Vec<u8>);

impl JsonPayload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Decode into `T`, then normalize and validate it.
    /// An empty body reads as `{}`.
    pub fn decode<T: FromFields + Normalize + Validate>(&self) -> Result<T, FieldErrors> {
        let mut fields = BodyFields::parse(&self.0)?;
        let payload = T::from_fields(&mut fields);
        if !fields.errors.is_empty() {
            return Err(fields.errors);
        }
        clean(payload)
    }
}

/// A JSON object being read field by field
pub struct BodyFields {
    map: Map<String, Value>,
    errors: FieldErrors,
}

impl BodyFields {
    fn parse(bytes: &[u8]) -> Result<Self, FieldErrors> {
        let value = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(bytes).map_err(|e| {
                FieldErrors::single(NON_FIELD_ERRORS, format!("JSON parse error - {}", e))
            })?
        };
        match value {
            Value::Object(map) => Ok(Self {
                map,
                errors: FieldErrors::new(),
            }),
            _ => Err(FieldErrors::single(
                NON_FIELD_ERRORS,
                "Invalid data. Expected a dictionary.",
            )),
        }
    }

    /// Optional string field; `null` reads as absent
    pub fn text(&mut self, name: &str) -> Option<String> {
        match self.map.remove(name) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(_) => {
                self.errors.add(name, "Not a valid string.");
                None
            }
        }
    }
}

/// Payloads built from a [`BodyFields`] reader
pub trait FromFields {
    fn from_fields(fields: &mut BodyFields) -> Self;
}

// ============================================================================
// Payloads
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Default, Validate, ToSchema)]
pub struct CreatePostRequest {
    #[schema(example = "Hello")]
    #[validate(required, length(min = 1, max = 255))]
    pub title: Option<String>,
    #[schema(example = "First post")]
    #[validate(required, length(min = 1))]
    pub body: Option<String>,
}

impl FromFields for CreatePostRequest {
    fn from_fields(fields: &mut BodyFields) -> Self {
        Self {
            title: fields.text("title"),
            body: fields.text("body"),
        }
    }
}

impl Normalize for CreatePostRequest {
    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.body);
    }
}

/// Update post request (partial; absent fields are left unchanged)
#[derive(Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdatePostRequest {
    #[schema(example = "Hello again")]
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub body: Option<String>,
}

impl FromFields for UpdatePostRequest {
    fn from_fields(fields: &mut BodyFields) -> Self {
        Self {
            title: fields.text("title"),
            body: fields.text("body"),
        }
    }
}

impl Normalize for UpdatePostRequest {
    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.body);
    }
}

/// Create comment request
#[derive(Debug, Clone, Default, Validate, ToSchema)]
pub struct CreateCommentRequest {
    #[schema(example = "hi")]
    #[validate(required, length(min = 1))]
    pub body: Option<String>,
}

impl FromFields for CreateCommentRequest {
    fn from_fields(fields: &mut BodyFields) -> Self {
        Self {
            body: fields.text("body"),
        }
    }
}

impl Normalize for CreateCommentRequest {
    fn normalize(&mut self) {
        trim_in_place(&mut self.body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post_missing_fields() {
        let errors = clean(CreatePostRequest::default()).unwrap_err();
        assert_eq!(errors.get("title").unwrap(), ["This field is required."]);
        assert_eq!(errors.get("body").unwrap(), ["This field is required."]);
    }

    #[test]
    fn test_create_post_blank_title() {
        let req = CreatePostRequest {
            title: Some("   ".to_string()),
            body: Some("B".to_string()),
        };
        let errors = clean(req).unwrap_err();
        assert_eq!(errors.get("title").unwrap(), ["This field may not be blank."]);
        assert!(errors.get("body").is_none());
    }

    #[test]
    fn test_create_post_title_too_long() {
        let req = CreatePostRequest {
            title: Some("x".repeat(TITLE_MAX_LEN as usize + 1)),
            body: Some("B".to_string()),
        };
        let errors = clean(req).unwrap_err();
        assert_eq!(
            errors.get("title").unwrap(),
            ["Ensure this field has no more than 255 characters."]
        );
    }

    #[test]
    fn test_create_post_trims() {
        let req = CreatePostRequest {
            title: Some("  T ".to_string()),
            body: Some("B\n".to_string()),
        };
        let cleaned = clean(req).unwrap();
        assert_eq!(cleaned.title.as_deref(), Some("T"));
        assert_eq!(cleaned.body.as_deref(), Some("B"));
    }

    #[test]
    fn test_update_post_allows_absent_fields() {
        let cleaned = clean(UpdatePostRequest::default()).unwrap();
        assert!(cleaned.title.is_none());
        assert!(cleaned.body.is_none());
    }

    #[test]
    fn test_update_post_rejects_blank_body() {
        let req = UpdatePostRequest {
            title: None,
            body: Some("".to_string()),
        };
        let errors = clean(req).unwrap_err();
        assert!(errors.get("title").is_none());
        assert_eq!(errors.get("body").unwrap(), ["This field may not be blank."]);
    }

    #[test]
    fn test_comment_requires_body() {
        let errors = clean(CreateCommentRequest::default()).unwrap_err();
        assert!(errors.get("body").is_some());
    }

    #[test]
    fn test_payload_decodes_and_cleans() {
        let payload = JsonPayload::new(r#"{"title": " T ", "body": "B", "extra": 1}"#);
        let req: CreatePostRequest = payload.decode().unwrap();
        assert_eq!(req.title.as_deref(), Some("T"));
        assert_eq!(req.body.as_deref(), Some("B"));
    }

    #[test]
    fn test_payload_wrong_type_is_field_error() {
        let payload = JsonPayload::new(r#"{"title": 5, "body": null}"#);
        let errors = payload.decode::<UpdatePostRequest>().unwrap_err();
        assert_eq!(errors.get("title").unwrap(), ["Not a valid string."]);
        assert!(errors.get("body").is_none());

        let errors = JsonPayload::new(r#"{"body": [1]}"#)
            .decode::<CreateCommentRequest>()
            .unwrap_err();
        assert_eq!(errors.get("body").unwrap(), ["Not a valid string."]);
    }

    #[test]
    fn test_payload_empty_body_reads_as_empty_object() {
        let req: UpdatePostRequest = JsonPayload::default().decode().unwrap();
        assert!(req.title.is_none() && req.body.is_none());

        let errors = JsonPayload::new("  ")
            .decode::<CreateCommentRequest>()
            .unwrap_err();
        assert_eq!(errors.get("body").unwrap(), ["This field is required."]);
    }

    #[test]
    fn test_payload_malformed_or_not_an_object() {
        let errors = JsonPayload::new("{not json")
            .decode::<CreatePostRequest>()
            .unwrap_err();
        assert!(errors.get(NON_FIELD_ERRORS).unwrap()[0].starts_with("JSON parse error"));

        let errors = JsonPayload::new("[1, 2]")
            .decode::<CreatePostRequest>()
            .unwrap_err();
        assert_eq!(
            errors.get(NON_FIELD_ERRORS).unwrap(),
            ["Invalid data. Expected a dictionary."]
        );
    }

    #[test]
    fn test_field_errors_serialize_as_map() {
        let mut errors = FieldErrors::new();
        errors.add("body", "This field is required.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["body"][0], "This field is required.");
    }
}
