//! HTTP API Layer
//! Mission: Wire routes, auth, and logging into one router
//!
//! Reads are public; POST/PUT/DELETE on products pass through
//! [`auth_middleware`] first. Unknown paths and unsupported methods on known
//! paths both answer `404 {"error":"Route not found"}`. A trailing slash is
//! trimmed before routing, so `/products/` lists the catalog.

pub mod products;
pub mod validation;

use crate::{
    auth::{api as auth_api, auth_middleware, AuthState},
    error::ApiError,
    middleware::request_logging,
};
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use products::SharedStore;
use tower_http::{cors::CorsLayer, normalize_path::NormalizePath};

/// The served application: the router behind trailing-slash normalisation.
pub type App = NormalizePath<Router>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub products: SharedStore,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(products: SharedStore, auth: AuthState) -> Self {
        Self { products, auth }
    }
}

/// Build the full application router.
pub fn build_router(state: AppState) -> App {
    let require_auth =
        middleware::from_fn_with_state(state.auth.jwt_handler.clone(), auth_middleware);

    // Auth is layered onto the mutating methods only; GET is added afterwards
    let product_routes: Router = Router::new()
        .route("/", get(products::welcome).fallback(route_not_found))
        .route(
            "/products",
            post(products::create_product)
                .route_layer(require_auth.clone())
                .get(products::list_products)
                .fallback(route_not_found),
        )
        .route(
            "/products/:id",
            put(products::update_product)
                .delete(products::delete_product)
                .route_layer(require_auth)
                .get(products::get_product)
                .fallback(route_not_found),
        )
        .with_state(state.products);

    let auth_routes: Router = Router::new()
        .route(
            "/api/login",
            post(auth_api::login).fallback(route_not_found),
        )
        .with_state(state.auth);

    let router = Router::new()
        .merge(product_routes)
        .merge(auth_routes)
        .fallback(route_not_found)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive());

    // Router::layer runs after matching, so the rewrite has to wrap the router
    NormalizePath::trim_trailing_slash(router)
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
