use std::time::Duration;

use anyhow::{Context, bail};
use reelmix_catalog::ClientConfig;

/// Runtime configuration, read from `REELMIX_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub tmdb: ClientConfig,
    pub mal: ClientConfig,
    pub anilist: ClientConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |name: &str| get(name).filter(|v| !v.trim().is_empty());

        let Some(tmdb_key) = non_empty("REELMIX_TMDB_API_KEY") else {
            bail!("REELMIX_TMDB_API_KEY must be set");
        };
        let Some(mal_client_id) = non_empty("REELMIX_MAL_CLIENT_ID") else {
            bail!("REELMIX_MAL_CLIENT_ID must be set");
        };

        let secs = |name: &str, default: u64| -> anyhow::Result<Duration> {
            match non_empty(name) {
                Some(v) => v
                    .parse()
                    .map(Duration::from_secs)
                    .with_context(|| format!("{name} must be a whole number of seconds")),
                None => Ok(Duration::from_secs(default)),
            }
        };
        let cache_ttl = secs("REELMIX_CACHE_TTL_SECS", 3600)?;
        let timeout = secs("REELMIX_UPSTREAM_TIMEOUT_SECS", 10)?;

        let mut tmdb = ClientConfig::tmdb(tmdb_key);
        if let Some(url) = non_empty("REELMIX_TMDB_BASE_URL") {
            tmdb = ClientConfig::new(tmdb.credential, url);
        }
        let mut mal = ClientConfig::mal(mal_client_id);
        if let Some(url) = non_empty("REELMIX_MAL_BASE_URL") {
            mal = ClientConfig::new(mal.credential, url);
        }
        let mut anilist = ClientConfig::anilist();
        if let Some(url) = non_empty("REELMIX_ANILIST_URL") {
            anilist = ClientConfig::new("", url).with_cache_ttl(anilist.cache_ttl);
        }

        Ok(Self {
            bind_addr: non_empty("REELMIX_BIND").unwrap_or_else(|| "0.0.0.0:8097".to_string()),
            tmdb: tmdb.with_cache_ttl(cache_ttl).with_timeout(timeout),
            mal: mal.with_cache_ttl(cache_ttl).with_timeout(timeout),
            anilist: anilist.with_timeout(timeout),
        })
    }
}
