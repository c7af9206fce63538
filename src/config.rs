use anyhow::Context;

/// One year.
const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;
const MAX_LEEWAY_SECS: u64 = 60 * 60;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    /// Clock skew tolerated when checking `exp`.
    pub leeway_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).with_context(|| format!("{key} must be set"));

        let jwt = JwtConfig {
            secret: required("JWT_SECRET")?,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "ev-booking".into()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "ev-booking-users".into()),
            ttl_minutes: parsed(&lookup, "JWT_TTL_MINUTES").unwrap_or(60 * 24),
            leeway_secs: parsed(&lookup, "JWT_LEEWAY_SECS").unwrap_or(60),
        };
        anyhow::ensure!(
            (1..=MAX_TTL_MINUTES).contains(&jwt.ttl_minutes),
            "JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}"
        );
        anyhow::ensure!(
            jwt.leeway_secs <= MAX_LEEWAY_SECS,
            "JWT_LEEWAY_SECS must be at most {MAX_LEEWAY_SECS}"
        );

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            db_max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(10),
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parsed(&lookup, "APP_PORT").unwrap_or(8080),
            jwt,
        })
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.parse().ok())
}
