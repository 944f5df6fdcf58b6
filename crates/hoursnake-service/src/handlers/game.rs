//! Game-flow handlers: star balance, entry-fee spend, score submission.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use hoursnake_core::{validate_score, HourBucket, PlayerId};
use hoursnake_store::Store;

use crate::error::ApiError;
use crate::state::AppState;

/// Request carrying just a player identity.
#[derive(Debug, Deserialize)]
pub struct PlayerRequest {
    /// The platform-supplied numeric id.
    pub telegram_id: i64,
    /// Optional display name, recorded on first contact.
    #[serde(default)]
    pub username: Option<String>,
}

fn parse_player(raw: i64) -> Result<PlayerId, ApiError> {
    PlayerId::new(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Star balance response.
#[derive(Debug, Serialize)]
pub struct StarsResponse {
    /// Always true; the lookup itself succeeded.
    pub ok: bool,
    /// Current balance; 0 for a player with no account yet.
    pub stars: i64,
}

/// Get the player's star balance.
///
/// A pure read: an unknown player reports 0 stars and no account is
/// created.
pub async fn get_stars(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PlayerRequest>,
) -> Result<Json<StarsResponse>, ApiError> {
    let player = parse_player(body.telegram_id)?;

    let stars = state
        .store
        .get_account(player)?
        .map_or(0, |a| a.star_balance);

    Ok(Json(StarsResponse { ok: true, stars }))
}

/// Spend response.
#[derive(Debug, Serialize)]
pub struct SpendResponse {
    /// Whether the entry fee was deducted.
    pub ok: bool,
    /// Balance after the attempt.
    pub stars: i64,
    /// Human-readable outcome.
    pub message: String,
}

/// Deduct the entry fee to start a game.
///
/// First contact creates the account with the configured default grant.
/// Insufficient balance is an ordinary `ok: false` response, not an error.
pub async fn spend_star(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PlayerRequest>,
) -> Result<Json<SpendResponse>, ApiError> {
    let player = parse_player(body.telegram_id)?;

    state
        .store
        .ensure_account(player, body.username.as_deref(), state.config.default_stars)?;

    let outcome = state.store.try_spend(player, state.config.entry_fee)?;

    if outcome.ok {
        tracing::debug!(player = %player, stars = outcome.balance, "Entry fee deducted");
        Ok(Json(SpendResponse {
            ok: true,
            stars: outcome.balance,
            message: "Game started. 1 star deducted.".into(),
        }))
    } else {
        Ok(Json(SpendResponse {
            ok: false,
            stars: outcome.balance,
            message: "Not enough stars. Please top up first.".into(),
        }))
    }
}

/// Score submission request.
#[derive(Debug, Deserialize)]
pub struct SubmitScoreRequest {
    /// The platform-supplied numeric id.
    pub telegram_id: i64,
    /// The score achieved this round.
    pub score: i64,
    /// Optional display name, recorded on first contact.
    #[serde(default)]
    pub username: Option<String>,
}

/// Score submission response.
#[derive(Debug, Serialize)]
pub struct SubmitScoreResponse {
    /// Always true; the submission was merged.
    pub ok: bool,
    /// The hour bucket the score landed in.
    pub bucket: i64,
    /// The stored best for this bucket after the merge.
    pub best: i64,
    /// Whether this submission raised the stored best.
    pub improved: bool,
}

/// Submit a score into the current hour bucket.
///
/// Merging is monotonic-max, so retries and double-submits are harmless.
pub async fn submit_score(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SubmitScoreRequest>,
) -> Result<Json<SubmitScoreResponse>, ApiError> {
    let player = parse_player(body.telegram_id)?;
    let score = validate_score(body.score)?;

    state
        .store
        .ensure_account(player, body.username.as_deref(), state.config.default_stars)?;

    let bucket = HourBucket::current();
    let merge = state.store.submit_score(player, bucket, score)?;

    tracing::debug!(
        player = %player,
        bucket = %bucket,
        score,
        best = merge.best,
        improved = merge.improved,
        "Score submitted"
    );

    Ok(Json(SubmitScoreResponse {
        ok: true,
        bucket: bucket.as_i64(),
        best: merge.best,
        improved: merge.improved,
    }))
}
