//! Admin handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use hoursnake_core::{validate_amount, PlayerId};
use hoursnake_store::Store;

use crate::error::ApiError;
use crate::state::AppState;

/// Manual top-up request.
#[derive(Debug, Deserialize)]
pub struct TopupRequest {
    /// The platform-supplied numeric id.
    pub telegram_id: i64,
    /// Stars to add. Must be positive.
    pub amount: i64,
    /// Optional display name, recorded on first contact.
    #[serde(default)]
    pub username: Option<String>,
}

/// Manual top-up response.
#[derive(Debug, Serialize)]
pub struct TopupResponse {
    /// Always true; the credit was applied.
    pub ok: bool,
    /// Balance after the credit.
    pub stars: i64,
}

/// Manually credit stars to a player, creating the account if needed.
pub async fn topup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TopupRequest>,
) -> Result<Json<TopupResponse>, ApiError> {
    let player =
        PlayerId::new(body.telegram_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let amount = validate_amount(body.amount)?;

    state
        .store
        .ensure_account(player, body.username.as_deref(), state.config.default_stars)?;
    let stars = state.store.credit(player, amount)?;

    tracing::info!(player = %player, amount, stars, "Manual top-up applied");

    Ok(Json(TopupResponse { ok: true, stars }))
}
