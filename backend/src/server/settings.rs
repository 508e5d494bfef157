//! Process settings loaded via OrthoConfig.
//!
//! Layered from defaults, a configuration file, `ARTICLES_*` environment
//! variables, and command-line flags.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Listener and database settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ARTICLES")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one, articles live in memory and only the
    /// built-in accounts can sign in.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl ServerSettings {
    /// Configured listen address, or `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a socket address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address '{raw}': {err}"),
            )
        })
    }

    /// Trimmed database URL; blank values count as unset.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, falling back to the default when unset or zero.
    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .filter(|max| *max > 0)
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("articles-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("ARTICLES_BIND_ADDR", None::<String>),
            ("ARTICLES_DATABASE_URL", None::<String>),
            ("ARTICLES_DB_MAX_CONNECTIONS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("ARTICLES_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "ARTICLES_DATABASE_URL",
                Some("postgres://localhost/articles".to_owned()),
            ),
            ("ARTICLES_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("parses"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("valid")
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/articles")
        );
        assert_eq!(settings.db_max_connections(), 4);
    }

    #[rstest]
    #[case(Some("   "), None)]
    #[case(Some("postgres://db/articles"), Some("postgres://db/articles"))]
    #[case(None, None)]
    fn blank_database_url_means_in_memory(
        #[case] raw: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let settings = ServerSettings {
            bind_addr: None,
            database_url: raw.map(str::to_owned),
            db_max_connections: Some(0),
        };
        assert_eq!(settings.database_url(), expected);
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
    }

    #[rstest]
    fn malformed_bind_addr_is_rejected() {
        let settings = ServerSettings {
            bind_addr: Some("not-an-address".to_owned()),
            database_url: None,
            db_max_connections: None,
        };
        let err = settings.bind_addr().expect_err("rejected");
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
