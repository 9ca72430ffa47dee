//! Authentication API Endpoints
//! Mission: Exchange the configured credentials for a bearer token

use crate::{
    api::validation::parse_json_body,
    auth::{credentials::CredentialStore, jwt::JwtHandler, models::LoginResponse},
    error::ApiError,
};
use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub credentials: Arc<CredentialStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(credentials: Arc<CredentialStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            credentials,
            jwt_handler,
        }
    }
}

/// Login endpoint - POST /api/login
pub async fn login(
    State(state): State<AuthState>,
    body: Bytes,
) -> Result<Json<LoginResponse>, ApiError> {
    let payload = parse_json_body(&body)?;
    let username = required_field(&payload, "username")?;
    let password = required_field(&payload, "password")?;

    // Present but not text can never match the configured pair
    let (Some(username), Some(password)) = (username.as_str(), password.as_str()) else {
        warn!("Failed login attempt: non-string credentials");
        return Err(ApiError::InvalidCredentials);
    };

    info!("Login attempt: {}", username);

    // bcrypt is CPU bound; keep it off the reactor
    let credentials = state.credentials.clone();
    let (user, pass) = (username.to_string(), password.to_string());
    let valid = tokio::task::spawn_blocking(move || credentials.verify(&user, &pass))
        .await
        .map_err(|e| ApiError::Internal(format!("credential check panicked: {e}")))?;

    if !valid {
        warn!("Failed login attempt: {}", username);
        return Err(ApiError::InvalidCredentials);
    }

    let token = state
        .jwt_handler
        .issue(username)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!("Login successful: {}", username);

    Ok(Json(LoginResponse { token }))
}

/// A credential field counts as supplied only when it is truthy.
fn required_field<'a>(payload: &'a Value, field: &str) -> Result<&'a Value, ApiError> {
    match payload.get(field) {
        Some(value) if is_truthy(value) => Ok(value),
        _ => Err(ApiError::MissingCredentials),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_state() -> AuthState {
        AuthState::new(
            Arc::new(CredentialStore::with_cost("admin", "password123", 4).unwrap()),
            Arc::new(JwtHandler::new("test-secret", 3600)),
        )
    }

    async fn login_with(state: &AuthState, body: Value) -> Result<Json<LoginResponse>, ApiError> {
        login(State(state.clone()), Bytes::from(body.to_string())).await
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let state = test_state();
        let Json(response) = login_with(
            &state,
            json!({ "username": "admin", "password": "password123" }),
        )
        .await
        .unwrap();

        let claims = state.jwt_handler.verify(&response.token).unwrap();
        assert_eq!(claims.username, "admin");
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let state = test_state();

        for body in [
            json!({ "username": "admin" }),
            json!({ "password": "password123" }),
            json!({ "username": "", "password": "password123" }),
            json!({ "username": "admin", "password": null }),
            json!({}),
        ] {
            let err = login_with(&state, body).await.unwrap_err();
            assert!(matches!(err, ApiError::MissingCredentials));
        }
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_credentials() {
        let state = test_state();

        let err = login_with(&state, json!({ "username": "admin", "password": "nope" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials));

        let err = login_with(&state, json!({ "username": 123, "password": "password123" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!([])));
    }
}
