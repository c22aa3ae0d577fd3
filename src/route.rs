//! Route definitions for the URL shortener API
//!
//! This module configures all HTTP routes and maps them to their respective handlers.

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handler::{
    create_hash, create_url, delete_url, get_url, list_urls, redirect_url, update_url,
};
use crate::resolver::Resolver;
use crate::storage::UrlStore;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
}

impl AppState {
    pub fn new(store: Arc<dyn UrlStore>) -> Self {
        Self {
            resolver: Resolver::new(store),
        }
    }
}

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `POST /` - Creates a short URL
/// - `GET /get/{id}` - Fetches a record by id
/// - `GET /createHash/{id}` - Returns the short code of an id
/// - `GET /list` - Lists all records
/// - `PUT /update/{id}` - Replaces the target of a record
/// - `DELETE /delete/{id}` - Deletes a record
/// - `GET /{hash}` - Redirects to the original URL
///
/// Static segments win over the `/{hash}` capture, so `/list` never
/// reaches the redirect handler.
///
/// # Example Usage
///
/// ```no_run
/// # use std::sync::Arc;
/// # use shortener::database::RedbStore;
/// # use shortener::route::{create_app, AppState};
/// let store = RedbStore::open("data.db").unwrap();
/// let app = create_app(AppState::new(Arc::new(store)));
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", post(create_url))
        .route("/get/{id}", get(get_url))
        .route("/createHash/{id}", get(create_hash))
        .route("/list", get(list_urls))
        .route("/update/{id}", put(update_url))
        .route("/delete/{id}", delete(delete_url))
        .route("/{hash}", get(redirect_url))
        .with_state(state)
}
