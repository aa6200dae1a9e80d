use anyhow::{anyhow, Result};
use std::env;

/// Process configuration loaded once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub http_port: u16,
    pub admin_ids: Vec<i64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/bookings.db".to_string());
        let database_url = if database_url.trim().is_empty() {
            "sqlite:./data/bookings.db".to_string()
        } else {
            database_url
        };

        let port_str = env::var("HTTP_PORT").unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let admin_raw =
            env::var("ADMIN_IDS").map_err(|_| anyhow!("ADMIN_IDS must be set"))?;
        let admin_ids = parse_admin_ids(&admin_raw)?;

        Ok(Config {
            telegram_bot_token: token,
            database_url,
            http_port,
            admin_ids,
        })
    }
}

/// Parses a comma-separated list of Telegram user ids. Any malformed entry
/// is fatal: a partially usable operator list is worse than refusing to start.
pub fn parse_admin_ids(raw: &str) -> Result<Vec<i64>> {
    let mut ids = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id: i64 = part
            .parse()
            .map_err(|_| anyhow!("Invalid admin id in ADMIN_IDS: '{part}'"))?;
        ids.push(id);
    }
    if ids.is_empty() {
        return Err(anyhow!("ADMIN_IDS must contain at least one id"));
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_admin_ids_valid() {
        let ids = parse_admin_ids("123,456").unwrap();
        assert_eq!(ids, vec![123, 456]);
    }

    #[test]
    fn test_parse_admin_ids_whitespace_and_trailing_comma() {
        let ids = parse_admin_ids(" 123 , 456 ,").unwrap();
        assert_eq!(ids, vec![123, 456]);
    }

    #[test]
    fn test_parse_admin_ids_malformed_is_fatal() {
        assert!(parse_admin_ids("123,abc").is_err());
        assert!(parse_admin_ids("12.5").is_err());
    }

    #[test]
    fn test_parse_admin_ids_empty_is_fatal() {
        assert!(parse_admin_ids("").is_err());
        assert!(parse_admin_ids(",,,").is_err());
    }
}
