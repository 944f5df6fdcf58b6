//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, game, health, leaderboard};
use crate::state::AppState;

/// Maximum concurrent requests for the game/leaderboard API.
const API_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Game
/// - `POST /game/stars` - Get star balance
/// - `POST /game/spend` - Deduct the entry fee to start a game
/// - `POST /game/score` - Submit a score into the current hour
///
/// ## Leaderboards
/// - `GET /leaderboard/hourly` - Top scorers of one hour bucket
/// - `GET /leaderboard/all-time` - Cumulative all-time ranking
///
/// ## Admin
/// - `POST /admin/topup` - Manually credit stars
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let game_routes = Router::new()
        .route("/stars", post(game::get_stars))
        .route("/spend", post(game::spend_star))
        .route("/score", post(game::submit_score));

    let leaderboard_routes = Router::new()
        .route("/hourly", get(leaderboard::hourly))
        .route("/all-time", get(leaderboard::all_time));

    let api_routes = Router::new()
        .nest("/game", game_routes)
        .nest("/leaderboard", leaderboard_routes)
        .route("/admin/topup", post(admin::topup))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no limits)
        .route("/health", get(health::health))
        .merge(api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
