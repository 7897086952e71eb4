use reelmix_core::types::{CatalogItem, PaginatedFeed};
use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Kind filter for movie/TV provider discover calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Movie,
    Tv,
}

impl ScreenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

/// Which media a trending call spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingScope {
    All,
    Movie,
    Tv,
}

impl TrendingScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

/// A movie/TV metadata provider.
#[async_trait::async_trait]
pub trait MovieTvCatalog: Send + Sync {
    fn name(&self) -> &str;

    /// Discover titles of one kind, optionally restricted to a comma-separated genre list.
    async fn discover(
        &self,
        kind: ScreenKind,
        page: u32,
        genres: Option<&str>,
    ) -> Result<PaginatedFeed, CatalogError>;

    async fn trending(
        &self,
        scope: TrendingScope,
        window: TimeWindow,
        page: u32,
    ) -> Result<PaginatedFeed, CatalogError>;

    /// Multi search; only movie and TV results are returned.
    async fn search(&self, query: &str, page: u32) -> Result<PaginatedFeed, CatalogError>;
}

/// Ranking lists exposed by the anime provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingType {
    All,
    Airing,
    Upcoming,
    ByPopularity,
}

impl RankingType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Airing => "airing",
            Self::Upcoming => "upcoming",
            Self::ByPopularity => "bypopularity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
        }
    }

    /// Anime season a calendar month (1-12) falls in.
    pub fn from_month(month: u32) -> Self {
        match month {
            1..=3 => Self::Winter,
            4..=6 => Self::Spring,
            7..=9 => Self::Summer,
            _ => Self::Fall,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "winter" => Some(Self::Winter),
            "spring" => Some(Self::Spring),
            "summer" => Some(Self::Summer),
            "fall" => Some(Self::Fall),
            _ => None,
        }
    }
}

/// Current `(year, season)` in UTC.
pub fn current_season() -> (i32, Season) {
    use chrono::Datelike;
    let now = chrono::Utc::now();
    (now.year(), Season::from_month(now.month()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonSort {
    Score,
    ListUsers,
}

impl SeasonSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Score => "anime_score",
            Self::ListUsers => "anime_num_list_users",
        }
    }
}

/// One page from the anime provider. Offset paginated with no total count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimeFeed {
    pub items: Vec<CatalogItem>,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartSeason {
    pub year: i32,
    pub season: Season,
}

/// Full anime record, built around the canonical catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeDetails {
    pub item: CatalogItem,
    pub alternative_titles: Vec<String>,
    pub synopsis: Option<String>,
    pub mean: Option<f64>,
    pub rank: Option<u32>,
    pub popularity: Option<u32>,
    pub num_episodes: Option<u32>,
    pub status: Option<String>,
    pub format: Option<String>,
    pub genres: Vec<String>,
    pub studios: Vec<String>,
    pub start_season: Option<StartSeason>,
    pub source: Option<String>,
    pub average_episode_duration: Option<u32>,
    pub age_rating: Option<String>,
    pub pictures: Vec<String>,
    pub related: Vec<CatalogItem>,
    pub recommendations: Vec<CatalogItem>,
}

impl AnimeDetails {
    pub fn is_airing(&self) -> bool {
        self.status.as_deref() == Some("currently_airing")
    }

    pub fn episode_count(&self) -> u32 {
        self.num_episodes.unwrap_or(0)
    }

    /// e.g. "Spring 2024", or "Unknown" without a start season.
    pub fn season_label(&self) -> String {
        match &self.start_season {
            Some(s) => {
                let name = s.season.as_str();
                let mut chars = name.chars();
                let capitalized = match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                };
                format!("{capitalized} {}", s.year)
            }
            None => "Unknown".to_string(),
        }
    }
}

/// An anime metadata provider.
#[async_trait::async_trait]
pub trait AnimeCatalog: Send + Sync {
    fn name(&self) -> &str;

    async fn ranking(
        &self,
        ranking: RankingType,
        limit: u32,
        offset: u32,
    ) -> Result<AnimeFeed, CatalogError>;

    async fn season(
        &self,
        year: i32,
        season: Season,
        sort: SeasonSort,
        limit: u32,
        offset: u32,
    ) -> Result<AnimeFeed, CatalogError>;

    async fn search(&self, query: &str, limit: u32, offset: u32)
    -> Result<AnimeFeed, CatalogError>;

    async fn details(&self, id: u64) -> Result<AnimeDetails, CatalogError>;
}

/// Maps anime-provider ids onto another tracker's ids.
#[async_trait::async_trait]
pub trait AnimeIdMapper: Send + Sync {
    /// Best-effort: `None` when unknown or when the lookup fails.
    async fn anilist_id(&self, mal_id: u64) -> Option<u64>;
}
