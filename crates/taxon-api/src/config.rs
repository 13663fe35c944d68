//! Server settings read from the environment.
//!
//! | Variable          | Default                  |
//! |-------------------|--------------------------|
//! | `HOST`            | `0.0.0.0`                |
//! | `PORT`            | `3000`                   |
//! | `ALLOWED_ORIGINS` | `http://localhost:3000`  |
//! | `MAX_BODY_BYTES`  | 8 MiB                    |

use axum::http::HeaderValue;

use taxon_core::defaults::{MAX_BODY_SIZE_BYTES, SERVER_HOST, SERVER_PORT};

const DEFAULT_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<HeaderValue>,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: SERVER_HOST.to_string(),
            port: SERVER_PORT,
            allowed_origins: parse_allowed_origins(None),
            max_body_bytes: MAX_BODY_SIZE_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            allowed_origins: parse_allowed_origins(std::env::var("ALLOWED_ORIGINS").ok().as_deref()),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a comma-separated origin list, skipping invalid entries.
///
/// Unset or blank input yields the local development origin.
pub fn parse_allowed_origins(raw: Option<&str>) -> Vec<HeaderValue> {
    let raw = raw.unwrap_or_default();
    if raw.trim().is_empty() {
        return vec![HeaderValue::from_static(DEFAULT_ORIGIN)];
    }

    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_origin_when_unset() {
        assert_eq!(parse_allowed_origins(None), vec![DEFAULT_ORIGIN]);
        assert_eq!(parse_allowed_origins(Some("  ")), vec![DEFAULT_ORIGIN]);
    }

    #[test]
    fn test_origin_list_skips_blanks_and_invalid() {
        let origins = parse_allowed_origins(Some("https://a.example, ,https://b.example,bad\nvalue"));
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_bind_address() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..ServerConfig::default()
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
