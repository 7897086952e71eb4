use serde::{Deserialize, Serialize};

/// Which catalog namespace an id belongs to.
///
/// Ids are only unique within one kind: a movie and an anime may share a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Tv,
    Anime,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Anime => "anime",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audio variant for anime episodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioTrack {
    #[default]
    Sub,
    Dub,
}

impl AudioTrack {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sub => "sub",
            Self::Dub => "dub",
        }
    }
}

impl std::fmt::Display for AudioTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discoverable media unit, normalized from any upstream catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    pub media_kind: MediaKind,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    /// Score on a 0-1 scale regardless of source.
    pub rating: f64,
    pub adult: bool,
}

impl CatalogItem {
    /// Release year taken from the leading four digits of `release_date`.
    pub fn year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }

    /// Relative path of the detail page for this item.
    pub fn deep_link(&self) -> String {
        format!("/{}/{}", self.media_kind, self.id)
    }
}

/// One page of results, either from a single upstream or a merged feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedFeed {
    pub page: u32,
    pub results: Vec<CatalogItem>,
    /// Upper-bounded estimate; not authoritative for every source.
    pub total_pages: u32,
    pub has_next_page: bool,
}

impl PaginatedFeed {
    pub fn empty(page: u32) -> Self {
        Self {
            page,
            results: Vec::new(),
            total_pages: page,
            has_next_page: false,
        }
    }
}

/// Search-as-you-type entry for movies and TV shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSuggestion {
    pub id: u64,
    pub title: String,
    pub media_kind: MediaKind,
    pub poster_path: Option<String>,
    pub year: Option<String>,
}

/// A candidate third-party embed for playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSource {
    pub title: String,
    pub source_url: String,
    pub ads: bool,
    pub fast: bool,
    pub recommended: bool,
    /// Whether the embed accepts a start position.
    pub resumable: bool,
}
