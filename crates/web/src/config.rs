use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// Directory holding the built scouting client, served at `/`
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .context("PORT must be a number")?,
            database_url: lookup("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            jwt_secret: lookup("JWT_SECRET")
                .filter(|s| !s.is_empty())
                .context("Cannot load JWT_SECRET env variable")?,
            static_dir: lookup("STATIC_DIR")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_for_host_and_port() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://scout@localhost/scouting"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://scout@localhost/scouting"),
            ("JWT_SECRET", "s3cret"),
            ("STATIC_DIR", "client/build"),
        ]))
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.static_dir, Some(PathBuf::from("client/build")));
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let result = Config::from_lookup(lookup(&[(
            "DATABASE_URL",
            "postgres://scout@localhost/scouting",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_port_is_an_error() {
        let result = Config::from_lookup(lookup(&[
            ("PORT", "http"),
            ("DATABASE_URL", "postgres://scout@localhost/scouting"),
            ("JWT_SECRET", "s3cret"),
        ]));
        assert!(result.is_err());
    }
}
