//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "todoapp", version, about = "To-do list client for a remote todo API")]
pub struct Config {
    /// Base URL of the todo API.
    #[arg(long, env = "TODO_API_URL", default_value = "http://127.0.0.1:3000")]
    pub base_url: String,

    /// User whose todos this session reads and writes.
    #[arg(long, env = "TODO_USER_ID")]
    pub user_id: u64,

    /// How long an error message stays visible, in milliseconds.
    #[arg(long, env = "TODO_ERROR_TIMEOUT_MS", default_value_t = 3000)]
    pub error_timeout_ms: u64,
}

impl Config {
    pub fn error_timeout(&self) -> Duration {
        Duration::from_millis(self.error_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "todoapp",
            "--user-id",
            "12",
            "--base-url",
            "http://api.example/",
            "--error-timeout-ms",
            "500",
        ])
        .unwrap();
        assert_eq!(config.user_id, 12);
        assert_eq!(config.base_url, "http://api.example/");
        assert_eq!(config.error_timeout(), Duration::from_millis(500));
    }

    #[test]
    fn non_numeric_user_id_is_rejected() {
        assert!(Config::try_parse_from(["todoapp", "--user-id", "me"]).is_err());
    }
}
