use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tracing::warn;

const DEFAULT_DB_NAME: &str = "room_management";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Server settings read from the environment.
///
/// Storage is a SQLite file, so there is no `DB_HOST` / `DB_USER` /
/// `DB_PASSWORD`; `DB_NAME` names the file and `DATABASE_URL` overrides it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_connections: u32,
}

impl AppConfig {
    /// Every setting has a fallback, so this never fails.
    pub fn new_from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            let name = lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
            format!("sqlite://{name}.db?mode=rwc")
        });

        let host = parse_or("HOST", lookup("HOST"), IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT);
        let max_connections = parse_or(
            "DB_MAX_CONNECTIONS",
            lookup("DB_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        );

        Self {
            database_url,
            host,
            port,
            max_connections,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {}={:?}, using default", key, raw);
            default
        }),
    }
}
