pub mod anilist;
pub mod cursor;
pub mod discover;
pub mod http;
pub mod mal;
pub mod merge;
pub mod provider;
pub mod suggest;
pub mod tmdb;

use std::time::Duration;

use thiserror::Error;

/// Upstream service a request was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Movie,
    Tv,
    /// Movie/TV provider endpoints spanning both kinds (trending, multi search).
    MovieTv,
    Anime,
    AniList,
}

impl Upstream {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::MovieTv => "movie_tv",
            Self::Anime => "anime",
            Self::AniList => "anilist",
        }
    }
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("upstream {upstream} failed: {reason}")]
    UpstreamFetchFailed { upstream: Upstream, reason: String },
    #[error("not found")]
    NotFound,
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("request cancelled")]
    Cancelled,
}

impl CatalogError {
    pub fn upstream(upstream: Upstream, reason: impl Into<String>) -> Self {
        Self::UpstreamFetchFailed {
            upstream,
            reason: reason.into(),
        }
    }
}

/// Connection settings for one upstream client.
///
/// `credential` is the TMDB api key or the MAL client id; AniList ignores it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credential: String,
    pub base_url: String,
    /// Zero disables response caching.
    pub cache_ttl: Duration,
    pub timeout: Duration,
}

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

impl ClientConfig {
    pub fn new(credential: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            credential: credential.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn tmdb(api_key: impl Into<String>) -> Self {
        Self::new(api_key, tmdb::BASE_URL)
    }

    pub fn mal(client_id: impl Into<String>) -> Self {
        Self::new(client_id, mal::BASE_URL)
    }

    pub fn anilist() -> Self {
        let mut config = Self::new("", anilist::BASE_URL);
        config.cache_ttl = Duration::from_secs(86_400);
        config
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = ClientConfig::new("key", "http://127.0.0.1:9000/");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.cache_ttl, DEFAULT_CACHE_TTL);
    }

    #[test]
    fn upstream_error_names_the_source() {
        let err = CatalogError::upstream(Upstream::Anime, "MAL returned 500");
        assert_eq!(err.to_string(), "upstream anime failed: MAL returned 500");
    }
}
