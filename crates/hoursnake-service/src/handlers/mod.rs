//! API handlers.

pub mod admin;
pub mod game;
pub mod health;
pub mod leaderboard;
