//! Service configuration.

use hoursnake_core::{
    RewardTable, DEFAULT_ENTRY_FEE, DEFAULT_FIRST_PLACE_STARS, DEFAULT_SECOND_PLACE_STARS,
    DEFAULT_STARTING_STARS, DEFAULT_THIRD_PLACE_STARS,
};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Path to `RocksDB` data directory (default: "/data/hoursnake").
    pub data_dir: String,

    /// Stars granted to an account on first contact (default: 100).
    pub default_stars: i64,

    /// Stars deducted per game entry (default: 1).
    pub entry_fee: i64,

    /// Payouts for the top three ranks of a closed hour.
    pub rewards: RewardTable,

    /// Default leaderboard size (default: 10).
    pub leaderboard_limit: usize,

    /// Seconds between reward-cycle firings (default: 60).
    pub reward_poll_secs: u64,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Star amounts (grant, fee, rewards) are clamped to non-negative so a
    /// bad env value can never turn a deduction into a credit.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/data/hoursnake".into()),
            default_stars: env_parsed("HOURSNAKE_DEFAULT_STARS", DEFAULT_STARTING_STARS).max(0),
            entry_fee: env_parsed("HOURSNAKE_ENTRY_FEE", DEFAULT_ENTRY_FEE).max(0),
            rewards: RewardTable {
                first: env_parsed("HOURSNAKE_REWARD_FIRST", DEFAULT_FIRST_PLACE_STARS).max(0),
                second: env_parsed("HOURSNAKE_REWARD_SECOND", DEFAULT_SECOND_PLACE_STARS).max(0),
                third: env_parsed("HOURSNAKE_REWARD_THIRD", DEFAULT_THIRD_PLACE_STARS).max(0),
            },
            leaderboard_limit: env_parsed("HOURSNAKE_LEADERBOARD_LIMIT", 10),
            reward_poll_secs: env_parsed("HOURSNAKE_REWARD_POLL_SECS", 60),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: env_parsed("MAX_BODY_BYTES", 64 * 1024),
            request_timeout_seconds: env_parsed("REQUEST_TIMEOUT_SECONDS", 30),
        }
    }
}

/// Read an env var and parse it, falling back to the default when the var
/// is unset or malformed.
fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            data_dir: "/data/hoursnake".into(),
            default_stars: DEFAULT_STARTING_STARS,
            entry_fee: DEFAULT_ENTRY_FEE,
            rewards: RewardTable::default(),
            leaderboard_limit: 10,
            reward_poll_secs: 60,
            cors_origins: vec!["*".into()],
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
