use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::random::{PseudoRandomSource, SharedRandomSource};
use crate::routes;

// Anything that goes in here must be a handle or pointer that can be cloned.
// The underlying state itself should be shared.
#[derive(Clone)]
pub struct AppState {
    pub random_source: SharedRandomSource,
}

pub fn create_app() -> Router {
    let random_source: SharedRandomSource = Arc::new(Mutex::new(PseudoRandomSource));

    let state = AppState { random_source };

    let mut app = Router::new()
        .route("/", get(routes::index::get_index))
        .nest("/weather", routes::weather::routes(state.clone()))
        .nest("/api/weather", routes::weather_api::routes(state.clone()))
        .layer(TraceLayer::new_for_http());

    let assets_path = "assets";
    log::debug!("serving assets from {}", assets_path);
    let assets_service = ServeDir::new(assets_path);
    app = app.fallback_service(assets_service);
    app
}
