//! Product Catalog Endpoints
//! Mission: CRUD over the product store with validated bodies

use crate::{
    api::validation::{parse_json_body, validate_product_fields},
    auth::Claims,
    error::ApiError,
    models::{Product, WelcomeResponse},
    store::ProductStore,
};
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use tracing::info;

pub type SharedStore = Arc<dyn ProductStore>;

/// GET /
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Product Catalog API",
    })
}

/// GET /products
pub async fn list_products(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(store.list_all().await?))
}

/// GET /products/:id
pub async fn get_product(
    State(store): State<SharedStore>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = path_id(path)?.ok_or(ApiError::NotFound)?;
    Ok(Json(store.get_by_id(id).await?))
}

/// POST /products (auth required)
pub async fn create_product(
    State(store): State<SharedStore>,
    Extension(claims): Extension<Claims>,
    body: Bytes,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let fields = validate_product_fields(&parse_json_body(&body)?)?;
    let product = store.create(fields).await?;

    info!(
        id = product.id,
        user = %claims.username,
        backend = store.backend_name(),
        "Product created"
    );
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /products/:id (auth required)
pub async fn update_product(
    State(store): State<SharedStore>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<Product>, ApiError> {
    let id = path_id(path)?;
    let fields = validate_product_fields(&parse_json_body(&body)?)?;
    let id = id.ok_or(ApiError::NotFound)?;
    let product = store.update(id, fields).await?;

    info!(id, user = %claims.username, "Product updated");
    Ok(Json(product))
}

/// DELETE /products/:id (auth required)
pub async fn delete_product(
    State(store): State<SharedStore>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(path)?.ok_or(ApiError::NotFound)?;
    store.delete(id).await?;

    info!(id, user = %claims.username, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// An undecodable path segment is just another invalid id.
fn path_id(path: Result<Path<String>, PathRejection>) -> Result<Option<i64>, ApiError> {
    let Path(raw) = path.map_err(|_| ApiError::InvalidId)?;
    parse_id(&raw)
}

/// Read the leading integer of a path id, ignoring whatever trails it.
///
/// Leading whitespace, one sign and a `0x` prefix are accepted, so `12abc`
/// reads as 12 and `1.5` as 1. No digits at all is [`ApiError::InvalidId`].
/// `Ok(None)` means the digits are valid but too large for any stored id.
fn parse_id(raw: &str) -> Result<Option<i64>, ApiError> {
    let rest = raw.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let end = rest
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return Err(ApiError::InvalidId);
    }

    Ok(i64::from_str_radix(digits, radix)
        .ok()
        .map(|magnitude| if negative { -magnitude } else { magnitude }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("1").unwrap(), Some(1));
        assert_eq!(parse_id("-4").unwrap(), Some(-4));
        assert_eq!(parse_id("+8").unwrap(), Some(8));
        assert_eq!(parse_id("  7").unwrap(), Some(7));
        assert_eq!(parse_id("0x1A").unwrap(), Some(26));
    }

    #[test]
    fn test_parse_id_ignores_trailing_garbage() {
        assert_eq!(parse_id("12abc").unwrap(), Some(12));
        assert_eq!(parse_id("1.5").unwrap(), Some(1));
        assert_eq!(parse_id("3e2").unwrap(), Some(3));
    }

    #[test]
    fn test_parse_id_without_digits() {
        for raw in ["abc", "", "-", "+x", "0x", ".5", "x12"] {
            assert!(
                matches!(parse_id(raw), Err(ApiError::InvalidId)),
                "{raw:?} should be invalid"
            );
        }
    }

    #[test]
    fn test_parse_id_overflow_is_no_such_id() {
        assert_eq!(parse_id("99999999999999999999").unwrap(), None);
        assert_eq!(parse_id("-99999999999999999999").unwrap(), None);
    }
}
