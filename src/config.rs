use std::env;

/// Deployment settings, read once at cold start.
///
/// Every key is optional at startup so the process always comes up; a
/// request only fails if it reaches a route that needs a missing key.
/// Preflight and unmatched routes keep working on a misconfigured
/// deployment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// DynamoDB table holding posts (`TABLE_NAME`).
    pub table_name: Option<String>,
    /// Shared secret required by mutating routes (`ADMIN_TOKEN`).
    pub admin_token: Option<String>,
    /// Origins allowed to call the API (`ALLOWED_ORIGINS`, comma-separated).
    /// Empty means any origin is reflected back.
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            table_name: non_empty(env::var("TABLE_NAME").ok()),
            admin_token: non_empty(env::var("ADMIN_TOKEN").ok()),
            allowed_origins: parse_csv(env::var("ALLOWED_ORIGINS").ok()),
        }
    }
}

/// Treats an unset or empty variable the same way.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_csv(value: Option<String>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
