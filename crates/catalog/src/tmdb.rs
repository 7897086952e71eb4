//! TMDB (The Movie Database) catalog client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use reelmix_core::types::{CatalogItem, MediaKind, PaginatedFeed};

use crate::http::{JsonTransport, Lookup};
use crate::provider::{MovieTvCatalog, ScreenKind, TimeWindow, TrendingScope};
use crate::{CatalogError, ClientConfig, Upstream};

pub const BASE_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// TMDB refuses pages beyond this for every list endpoint.
pub const MAX_PAGES: u32 = 500;

pub struct TmdbClient {
    api_key: String,
    transport: JsonTransport,
}

impl TmdbClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            transport: JsonTransport::new("TMDB", &config),
            api_key: config.credential,
        }
    }

    async fn get_json(
        &self,
        upstream: Upstream,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, CatalogError> {
        let mut all_params = vec![("api_key", self.api_key.clone())];
        all_params.extend_from_slice(params);
        self.transport
            .get_json(upstream, Lookup::Listing, path, &all_params, &[])
            .await
    }
}

const POSTER_SIZE: &str = "w500";
const BACKDROP_SIZE: &str = "original";

/// Absolute image URL for a TMDB relative path at the given size (`w500`, `original`, ...).
pub fn image_url(path: &str, size: &str) -> String {
    format!("{IMAGE_BASE}/{size}{path}")
}

fn check_page(page: u32) -> Result<(), CatalogError> {
    if page == 0 || page > MAX_PAGES {
        return Err(CatalogError::InvalidRequest(format!(
            "page must be between 1 and {MAX_PAGES}"
        )));
    }
    Ok(())
}

#[async_trait::async_trait]
impl MovieTvCatalog for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn discover(
        &self,
        kind: ScreenKind,
        page: u32,
        genres: Option<&str>,
    ) -> Result<PaginatedFeed, CatalogError> {
        check_page(page)?;
        let mut params = vec![("page", page.to_string())];
        if let Some(g) = genres.filter(|g| !g.is_empty()) {
            params.push(("with_genres", g.to_string()));
        }

        let upstream = match kind {
            ScreenKind::Movie => Upstream::Movie,
            ScreenKind::Tv => Upstream::Tv,
        };
        let data = self
            .get_json(upstream, &format!("/discover/{}", kind.as_str()), &params)
            .await?;

        Ok(parse_feed(&data, Some(kind)))
    }

    async fn trending(
        &self,
        scope: TrendingScope,
        window: TimeWindow,
        page: u32,
    ) -> Result<PaginatedFeed, CatalogError> {
        check_page(page)?;
        let (upstream, hint) = match scope {
            TrendingScope::All => (Upstream::MovieTv, None),
            TrendingScope::Movie => (Upstream::Movie, Some(ScreenKind::Movie)),
            TrendingScope::Tv => (Upstream::Tv, Some(ScreenKind::Tv)),
        };
        let data = self
            .get_json(
                upstream,
                &format!("/trending/{}/{}", scope.as_str(), window.as_str()),
                &[("page", page.to_string())],
            )
            .await?;

        Ok(parse_feed(&data, hint))
    }

    async fn search(&self, query: &str, page: u32) -> Result<PaginatedFeed, CatalogError> {
        check_page(page)?;
        let data = self
            .get_json(
                Upstream::MovieTv,
                "/search/multi",
                &[("query", query.to_string()), ("page", page.to_string())],
            )
            .await?;

        Ok(parse_feed(&data, None))
    }
}

/// Normalize a TMDB list response. Entries that are neither movies nor TV shows are dropped.
pub(crate) fn parse_feed(data: &serde_json::Value, hint: Option<ScreenKind>) -> PaginatedFeed {
    let page = data["page"]
        .as_u64()
        .map(|p| u32::try_from(p).unwrap_or(u32::MAX))
        .unwrap_or(1);
    let total_pages = data["total_pages"]
        .as_u64()
        .map(|t| u32::try_from(t).unwrap_or(u32::MAX))
        .unwrap_or(0)
        .min(MAX_PAGES);
    let results = data["results"]
        .as_array()
        .map(|rs| rs.iter().filter_map(|r| parse_item(r, hint)).collect())
        .unwrap_or_default();

    PaginatedFeed {
        page,
        results,
        total_pages,
        has_next_page: page < total_pages,
    }
}

pub(crate) fn parse_item(r: &serde_json::Value, hint: Option<ScreenKind>) -> Option<CatalogItem> {
    let kind = match r["media_type"].as_str() {
        Some("movie") => MediaKind::Movie,
        Some("tv") => MediaKind::Tv,
        Some(_) => return None,
        None => match hint {
            Some(ScreenKind::Movie) => MediaKind::Movie,
            Some(ScreenKind::Tv) => MediaKind::Tv,
            // Trending entries without a media_type: movies carry `title`, shows `name`.
            None if r.get("title").is_some() => MediaKind::Movie,
            None => MediaKind::Tv,
        },
    };

    let (title_key, date_key) = match kind {
        MediaKind::Movie => ("title", "release_date"),
        _ => ("name", "first_air_date"),
    };

    Some(CatalogItem {
        id: r["id"].as_u64()?,
        media_kind: kind,
        title: r[title_key].as_str().unwrap_or("Unknown").to_string(),
        overview: r["overview"].as_str().map(|s| s.to_string()),
        poster_path: r["poster_path"]
            .as_str()
            .map(|p| image_url(p, POSTER_SIZE)),
        backdrop_path: r["backdrop_path"]
            .as_str()
            .map(|p| image_url(p, BACKDROP_SIZE)),
        release_date: r[date_key]
            .as_str()
            .filter(|d| !d.is_empty())
            .map(|s| s.to_string()),
        rating: r["vote_average"].as_f64().unwrap_or(0.0) / 10.0,
        adult: r["adult"].as_bool().unwrap_or(false),
    })
}
