use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Real-time length of one countdown tick.
    pub tick_interval_ms: u64,
    /// How long the result screen is shown before auto-advancing.
    pub result_delay_seconds: u64,
    /// Sessions with no activity for this long are dropped.
    pub session_idle_timeout_seconds: u64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            tick_interval_ms: env::var("TICK_INTERVAL_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .expect("Invalid TICK_INTERVAL_MS"),
            result_delay_seconds: env::var("RESULT_DELAY_SECONDS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .expect("Invalid RESULT_DELAY_SECONDS"),
            session_idle_timeout_seconds: env::var("SESSION_IDLE_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .expect("Invalid SESSION_IDLE_TIMEOUT_SECONDS"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
