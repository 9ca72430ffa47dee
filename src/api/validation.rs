//! Request body parsing and product field validation.

use crate::{error::ApiError, models::NewProduct};
use serde_json::{Map, Value};

/// Required product fields, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "description", "price", "imageUrl"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    Missing(&'static str),
    #[error("Name must be a string")]
    NameNotString,
    #[error("Description must be a string")]
    DescriptionNotString,
    #[error("Price must be a valid number")]
    InvalidPrice,
    #[error("ImageUrl must be a string")]
    ImageUrlNotString,
}

/// Parse a JSON request body. An empty body reads as `{}`.
pub fn parse_json_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)
}

/// Check a product payload and extract its four fields.
///
/// Presence of every field is checked before any type; the first failure wins.
/// Anything other than a JSON object has no fields. Extra keys (including `id`)
/// are ignored.
pub fn validate_product_fields(payload: &Value) -> Result<NewProduct, ValidationError> {
    for field in REQUIRED_FIELDS {
        if payload.get(field).map_or(true, Value::is_null) {
            return Err(ValidationError::Missing(field));
        }
    }

    let name = payload["name"]
        .as_str()
        .ok_or(ValidationError::NameNotString)?;
    let description = payload["description"]
        .as_str()
        .ok_or(ValidationError::DescriptionNotString)?;
    let price = payload["price"]
        .as_f64()
        .filter(|p| p.is_finite())
        .ok_or(ValidationError::InvalidPrice)?;
    let image_url = payload["imageUrl"]
        .as_str()
        .ok_or(ValidationError::ImageUrlNotString)?;

    Ok(NewProduct {
        name: name.to_string(),
        description: description.to_string(),
        price,
        image_url: image_url.to_string(),
    })
}
