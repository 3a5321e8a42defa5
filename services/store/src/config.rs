use anyhow::Context as _;

/// Store service configuration loaded from environment variables.
#[derive(Debug)]
pub struct StoreConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `STORE_PORT`.
    pub store_port: u16,
    /// Apply pending migrations before serving (default false). Env var: `RUN_MIGRATIONS`.
    pub run_migrations: bool,
}

impl StoreConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL is not set")?;
        let store_port = match lookup("STORE_PORT") {
            Some(v) => v.parse().with_context(|| format!("invalid STORE_PORT: {v}"))?,
            None => 3114,
        };
        let run_migrations = match lookup("RUN_MIGRATIONS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("invalid RUN_MIGRATIONS: {v}"))?,
            None => false,
        };
        Ok(Self {
            database_url,
            store_port,
            run_migrations,
        })
    }
}
