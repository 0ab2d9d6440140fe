//! Service settings loaded via OrthoConfig and the server configuration
//! objects built from them.
//!
//! Each binary loads its own settings struct: the user service reads
//! `HABITS_*` variables, the tracker `TRACKER_*`. CLI flags and config files
//! layer over the environment in the usual OrthoConfig order.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::inbound::http::session_config::SessionSettings;
use crate::outbound::persistence::{
    DEFAULT_CHECKOUT_TIMEOUT, DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig,
};
use crate::outbound::quotes::DEFAULT_QUOTE_ENDPOINT;

/// Default listener of the user service.
pub const DEFAULT_USER_SERVICE_BIND: &str = "0.0.0.0:8080";
/// Default listener of the tracker service.
pub const DEFAULT_TRACKER_BIND: &str = "0.0.0.0:8081";
/// Default base URL the tracker uses to reach the user service.
pub const DEFAULT_USER_SERVICE_URL: &str = "http://localhost:8080";
/// Default bound on identity lookups.
pub const DEFAULT_IDENTITY_TIMEOUT: Duration = Duration::from_secs(5);
/// Default bound on quote fetches.
pub const DEFAULT_QUOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while turning loaded settings into runtime values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// No database URL was supplied.
    #[error("missing database URL; set {variable}")]
    MissingDatabaseUrl { variable: &'static str },
    /// The bind address does not parse.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// A URL setting does not parse.
    #[error("invalid {name} '{value}': {source}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
}

fn parse_bind_addr(raw: Option<&str>, default: &str) -> Result<SocketAddr, SettingsError> {
    let value = raw.unwrap_or(default);
    value
        .parse()
        .map_err(|source| SettingsError::InvalidBindAddr {
            value: value.to_owned(),
            source,
        })
}

fn parse_url(name: &'static str, raw: Option<&str>, default: &str) -> Result<Url, SettingsError> {
    let value = raw.unwrap_or(default);
    Url::parse(value).map_err(|source| SettingsError::InvalidUrl {
        name,
        value: value.to_owned(),
        source,
    })
}

fn pool_config(
    database_url: Option<&str>,
    variable: &'static str,
    max_connections: Option<u32>,
    checkout_timeout_secs: Option<u64>,
) -> Result<PoolConfig, SettingsError> {
    let url = database_url
        .filter(|url| !url.trim().is_empty())
        .ok_or(SettingsError::MissingDatabaseUrl { variable })?;
    Ok(PoolConfig::new(url)
        .with_max_size(max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
        .with_connection_timeout(
            checkout_timeout_secs.map_or(DEFAULT_CHECKOUT_TIMEOUT, Duration::from_secs),
        ))
}

/// User service settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HABITS")]
pub struct UserServiceSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub db_max_connections: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_checkout_timeout_secs: Option<u64>,
}

impl UserServiceSettings {
    /// Listener address, defaulting to [`DEFAULT_USER_SERVICE_BIND`].
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind_addr(self.bind_addr.as_deref(), DEFAULT_USER_SERVICE_BIND)
    }

    /// Pool configuration. The database URL is required.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        pool_config(
            self.database_url.as_deref(),
            "HABITS_DATABASE_URL",
            self.db_max_connections,
            self.db_checkout_timeout_secs,
        )
    }
}

/// Tracker service settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRACKER")]
pub struct TrackerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub db_max_connections: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_checkout_timeout_secs: Option<u64>,
    /// Base URL of the user service.
    pub user_service_url: Option<String>,
    /// Seconds allowed for an identity lookup.
    pub identity_timeout_secs: Option<u64>,
    /// Quote provider endpoint.
    pub quote_url: Option<String>,
    /// Seconds allowed for a quote fetch.
    pub quote_timeout_secs: Option<u64>,
}

impl TrackerSettings {
    /// Listener address, defaulting to [`DEFAULT_TRACKER_BIND`].
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind_addr(self.bind_addr.as_deref(), DEFAULT_TRACKER_BIND)
    }

    /// Pool configuration. The database URL is required.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        pool_config(
            self.database_url.as_deref(),
            "TRACKER_DATABASE_URL",
            self.db_max_connections,
            self.db_checkout_timeout_secs,
        )
    }

    /// User service base URL.
    pub fn user_service_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "user service URL",
            self.user_service_url.as_deref(),
            DEFAULT_USER_SERVICE_URL,
        )
    }

    /// Quote provider endpoint.
    pub fn quote_url(&self) -> Result<Url, SettingsError> {
        parse_url("quote URL", self.quote_url.as_deref(), DEFAULT_QUOTE_ENDPOINT)
    }

    /// Identity lookup timeout.
    pub fn identity_timeout(&self) -> Duration {
        self.identity_timeout_secs
            .map_or(DEFAULT_IDENTITY_TIMEOUT, Duration::from_secs)
    }

    /// Quote fetch timeout.
    pub fn quote_timeout(&self) -> Duration {
        self.quote_timeout_secs
            .map_or(DEFAULT_QUOTE_TIMEOUT, Duration::from_secs)
    }
}

/// Everything [`super::create_user_server`] needs.
pub struct UserServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
}

impl UserServerConfig {
    /// Bundle session settings, listener and pool.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            session,
            bind_addr,
            db_pool,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Outbound endpoints used by the tracker.
#[derive(Debug, Clone)]
pub struct TrackerUpstreams {
    /// Base URL of the user service.
    pub user_service_url: Url,
    /// Bound on identity lookups.
    pub identity_timeout: Duration,
    /// Quote provider endpoint.
    pub quote_url: Url,
    /// Bound on quote fetches.
    pub quote_timeout: Duration,
}

impl TryFrom<&TrackerSettings> for TrackerUpstreams {
    type Error = SettingsError;

    fn try_from(settings: &TrackerSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            user_service_url: settings.user_service_url()?,
            identity_timeout: settings.identity_timeout(),
            quote_url: settings.quote_url()?,
            quote_timeout: settings.quote_timeout(),
        })
    }
}

/// Everything [`super::create_tracker_server`] needs.
pub struct TrackerServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) upstreams: TrackerUpstreams,
}

impl TrackerServerConfig {
    /// Bundle listener, pool and upstream endpoints.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, upstreams: TrackerUpstreams) -> Self {
        Self {
            bind_addr,
            db_pool,
            upstreams,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings loading.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const USER_VARS: [&str; 4] = [
        "HABITS_BIND_ADDR",
        "HABITS_DATABASE_URL",
        "HABITS_DB_MAX_CONNECTIONS",
        "HABITS_DB_CHECKOUT_TIMEOUT_SECS",
    ];
    const TRACKER_VARS: [&str; 8] = [
        "TRACKER_BIND_ADDR",
        "TRACKER_DATABASE_URL",
        "TRACKER_DB_MAX_CONNECTIONS",
        "TRACKER_DB_CHECKOUT_TIMEOUT_SECS",
        "TRACKER_USER_SERVICE_URL",
        "TRACKER_IDENTITY_TIMEOUT_SECS",
        "TRACKER_QUOTE_URL",
        "TRACKER_QUOTE_TIMEOUT_SECS",
    ];

    fn cleared<const N: usize>(
        names: [&'static str; N],
        set: &[(&'static str, &str)],
    ) -> Vec<(&'static str, Option<String>)> {
        names
            .into_iter()
            .map(|name| {
                let value = set
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (*value).to_owned());
                (name, value)
            })
            .collect()
    }

    fn load_user() -> UserServiceSettings {
        UserServiceSettings::load_from_iter([OsString::from("user-service")])
            .expect("config should load")
    }

    fn load_tracker() -> TrackerSettings {
        TrackerSettings::load_from_iter([OsString::from("tracker-service")])
            .expect("config should load")
    }

    #[rstest]
    fn user_service_defaults() {
        let _guard = lock_env(cleared(USER_VARS, &[]));

        let settings = load_user();
        assert_eq!(
            settings.bind_addr().expect("default bind"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("addr")
        );
        assert!(matches!(
            settings.pool_config(),
            Err(SettingsError::MissingDatabaseUrl {
                variable: "HABITS_DATABASE_URL"
            })
        ));
    }

    #[rstest]
    fn user_service_environment_overrides() {
        let _guard = lock_env(cleared(
            USER_VARS,
            &[
                ("HABITS_BIND_ADDR", "127.0.0.1:9000"),
                ("HABITS_DATABASE_URL", "postgres://habits@db/habits"),
                ("HABITS_DB_MAX_CONNECTIONS", "3"),
                ("HABITS_DB_CHECKOUT_TIMEOUT_SECS", "9"),
            ],
        ));

        let settings = load_user();
        assert_eq!(
            settings.bind_addr().expect("bind"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("addr")
        );
        let pool = settings.pool_config().expect("pool config");
        assert_eq!(pool.database_url(), "postgres://habits@db/habits");
        assert_eq!(pool.max_size(), 3);
        assert_eq!(pool.connection_timeout(), Duration::from_secs(9));
    }

    #[rstest]
    fn tracker_defaults() {
        let _guard = lock_env(cleared(TRACKER_VARS, &[]));

        let settings = load_tracker();
        assert_eq!(
            settings.bind_addr().expect("default bind").port(),
            8081
        );
        let upstreams = TrackerUpstreams::try_from(&settings).expect("default upstreams");
        assert_eq!(upstreams.user_service_url.as_str(), "http://localhost:8080/");
        assert_eq!(upstreams.quote_url.as_str(), DEFAULT_QUOTE_ENDPOINT);
        assert_eq!(upstreams.identity_timeout, DEFAULT_IDENTITY_TIMEOUT);
        assert_eq!(upstreams.quote_timeout, DEFAULT_QUOTE_TIMEOUT);
    }

    #[rstest]
    fn tracker_environment_overrides() {
        let _guard = lock_env(cleared(
            TRACKER_VARS,
            &[
                ("TRACKER_DATABASE_URL", "postgres://tracker@db/habits"),
                ("TRACKER_USER_SERVICE_URL", "http://users.internal:8080/api"),
                ("TRACKER_IDENTITY_TIMEOUT_SECS", "2"),
                ("TRACKER_QUOTE_TIMEOUT_SECS", "4"),
            ],
        ));

        let settings = load_tracker();
        let upstreams = TrackerUpstreams::try_from(&settings).expect("upstreams");
        assert_eq!(upstreams.user_service_url.host_str(), Some("users.internal"));
        assert_eq!(upstreams.identity_timeout, Duration::from_secs(2));
        assert_eq!(upstreams.quote_timeout, Duration::from_secs(4));
        assert_eq!(
            settings.pool_config().expect("pool").database_url(),
            "postgres://tracker@db/habits"
        );
    }

    #[rstest]
    #[case::bind("TRACKER_BIND_ADDR", "not-an-addr")]
    #[case::url("TRACKER_USER_SERVICE_URL", "::nope")]
    fn tracker_rejects_malformed_values(#[case] name: &'static str, #[case] value: &str) {
        let _guard = lock_env(cleared(TRACKER_VARS, &[(name, value)]));

        let settings = load_tracker();
        let failed = settings.bind_addr().is_err() || TrackerUpstreams::try_from(&settings).is_err();
        assert!(failed, "{name}={value} should be rejected");
    }
}
