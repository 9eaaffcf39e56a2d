//! friday-server - REST API server for FRIDAY LITE.
//!
//! Exposes the intent relay and the chat assistant over HTTP.
//!
//! # Example
//!
//! ```ignore
//! use friday_core::FridayConfig;
//! use friday_server::{create_server, create_state};
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = create_state(&FridayConfig::from_env()).unwrap();
//!     let app = create_server(state);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod error;
pub mod factory;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use factory::create_state;
pub use state::AppState;

use axum::{middleware as axum_middleware, Router};
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState) -> Router {
    routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
