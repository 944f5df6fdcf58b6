//! Leaderboard projections.
//!
//! Two explicitly distinct views: the hourly best-per-player ranking for
//! one bucket, and the all-time cumulative ranking over account lifetime
//! scores.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use hoursnake_core::HourBucket;
use hoursnake_store::Store;

use crate::error::ApiError;
use crate::state::AppState;

/// Hourly leaderboard query parameters.
#[derive(Debug, Deserialize)]
pub struct HourlyQuery {
    /// Maximum entries to return (default: configured limit).
    pub n: Option<usize>,
    /// Bucket to project (default: the current hour).
    pub bucket: Option<i64>,
}

/// One hourly leaderboard row.
#[derive(Debug, Serialize)]
pub struct HourlyRow {
    /// The player's numeric id.
    pub telegram_id: i64,
    /// The player's display name, if known.
    pub username: Option<String>,
    /// Best score in the bucket.
    pub score: i64,
}

/// Hourly leaderboard response.
#[derive(Debug, Serialize)]
pub struct HourlyResponse {
    /// Always true.
    pub ok: bool,
    /// The projected bucket.
    pub bucket: i64,
    /// Rows, best first.
    pub leaderboard: Vec<HourlyRow>,
}

/// Project the top scorers of one hour bucket.
pub async fn hourly(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HourlyQuery>,
) -> Result<Json<HourlyResponse>, ApiError> {
    let n = query.n.unwrap_or(state.config.leaderboard_limit).min(100);
    let bucket = query.bucket.map_or_else(HourBucket::current, HourBucket::new);

    let rows = state
        .store
        .hourly_top(bucket, n)?
        .into_iter()
        .map(|r| HourlyRow {
            telegram_id: r.player_id.as_i64(),
            username: r.display_name,
            score: r.score,
        })
        .collect();

    Ok(Json(HourlyResponse {
        ok: true,
        bucket: bucket.as_i64(),
        leaderboard: rows,
    }))
}

/// All-time leaderboard query parameters.
#[derive(Debug, Deserialize)]
pub struct AllTimeQuery {
    /// Maximum entries to return (default: configured limit).
    pub n: Option<usize>,
}

/// One all-time leaderboard row.
#[derive(Debug, Serialize)]
pub struct AllTimeRow {
    /// The player's numeric id.
    pub telegram_id: i64,
    /// The player's display name, if known.
    pub username: Option<String>,
    /// Cumulative score across all buckets.
    pub total_score: i64,
}

/// All-time leaderboard response.
#[derive(Debug, Serialize)]
pub struct AllTimeResponse {
    /// Always true.
    pub ok: bool,
    /// Rows, best first.
    pub leaderboard: Vec<AllTimeRow>,
}

/// Project the all-time cumulative leaderboard.
pub async fn all_time(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AllTimeQuery>,
) -> Result<Json<AllTimeResponse>, ApiError> {
    let n = query.n.unwrap_or(state.config.leaderboard_limit).min(100);

    let rows = state
        .store
        .all_time_top(n)?
        .into_iter()
        .map(|r| AllTimeRow {
            telegram_id: r.player_id.as_i64(),
            username: r.display_name,
            total_score: r.lifetime_score,
        })
        .collect();

    Ok(Json(AllTimeResponse {
        ok: true,
        leaderboard: rows,
    }))
}
