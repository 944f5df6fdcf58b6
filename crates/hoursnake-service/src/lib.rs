//! HTTP API service for hoursnake.
//!
//! Wires the star ledger and the hourly score ledger behind a small JSON
//! API, and drives the hourly reward cycle as a background task. The
//! messaging-bot layer and the game client are collaborators of this
//! service; all they send is `{telegram_id}` or `{telegram_id, score}`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod rewards;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use rewards::{Disbursement, Payout, RewardCycle};
pub use routes::create_router;
pub use state::AppState;
