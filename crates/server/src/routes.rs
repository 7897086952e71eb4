use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method};
use axum::routing::get;
use axum::{Json, Router};
use reelmix_catalog::cursor::PageCursor;
use reelmix_catalog::discover::{
    DEFAULT_ANIME_LIMIT, DiscoverKind, DiscoverQuery, DiscoverRequest, MAX_LIMIT,
};
use reelmix_catalog::provider::AnimeDetails;
use reelmix_catalog::suggest::DEFAULT_LIMIT as DEFAULT_SUGGESTION_LIMIT;
use reelmix_core::error::ApiError;
use reelmix_core::types::{
    AudioTrack, CatalogItem, PaginatedFeed, PlayerSource, SearchSuggestion,
};
use reelmix_players::PlaybackTarget;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::headers::with_security_headers;
use crate::inflight::{FEED_KEY_HEADER, MAX_FEED_KEY_LEN};
use crate::state::AppState;

const MAX_SUGGESTIONS: usize = 50;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_router())
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::GET])
                    .allow_headers(Any),
            ),
        );
    with_security_headers(router).with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/discover", get(discover))
        // Search
        .route("/search", get(search))
        .route("/search/suggestions", get(search_suggestions))
        // Anime
        .route("/anime/list", get(anime_list))
        .route("/anime/search", get(anime_search))
        .route("/anime/{id}", get(anime_details))
        .route("/anime/{id}/anilist", get(anime_anilist_id))
        // Players
        .route("/players/movie/{id}", get(movie_players))
        .route("/players/tv/{id}/{season}/{episode}", get(tv_players))
        .route("/players/anime/{id}/{episode}", get(anime_players))
}

/// Parse a positive numeric id from a path segment. Anything else is a
/// missing resource rather than a malformed request.
fn parse_id(raw: &str, what: &str) -> Result<u64, ApiError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::NotFound(format!("no {what} with id {raw}")))
}

fn parse_number(raw: &str, what: &str, min: u32) -> Result<u32, ApiError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n >= min)
        .ok_or_else(|| ApiError::NotFound(format!("no {what} {raw}")))
}

fn page_param(page: Option<u32>) -> Result<u32, ApiError> {
    match page.unwrap_or(1) {
        0 => Err(ApiError::BadRequest("page must be at least 1".into())),
        page => Ok(page),
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    in_flight_feeds: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        in_flight_feeds: state.inflight.len(),
    })
}

// ---------------------------------------------------------------------------
// Feeds
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct FeedItem {
    #[serde(flatten)]
    item: CatalogItem,
    link: String,
}

#[derive(Serialize)]
struct FeedResponse {
    page: u32,
    results: Vec<FeedItem>,
    total_pages: u32,
    has_next_page: bool,
}

impl From<PaginatedFeed> for FeedResponse {
    fn from(feed: PaginatedFeed) -> Self {
        Self {
            page: feed.page,
            results: feed
                .results
                .into_iter()
                .map(|item| FeedItem {
                    link: item.deep_link(),
                    item,
                })
                .collect(),
            total_pages: feed.total_pages,
            has_next_page: feed.has_next_page,
        }
    }
}

// ---------------------------------------------------------------------------
// Discover
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct DiscoverParams {
    kind: Option<DiscoverKind>,
    #[serde(rename = "type")]
    query: Option<DiscoverQuery>,
    page: Option<u32>,
    limit: Option<u32>,
    genres: Option<String>,
}

async fn discover(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<DiscoverParams>,
) -> Result<Json<FeedResponse>, AppError> {
    let req = DiscoverRequest {
        kind: params.kind.unwrap_or_default(),
        query: params.query.unwrap_or_default(),
        page: page_param(params.page)?,
        limit: params.limit,
        genres: params.genres,
    };

    let feed_key = headers
        .get(FEED_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|k| !k.is_empty() && k.len() <= MAX_FEED_KEY_LEN);

    let feed = match feed_key {
        Some(key) => {
            // Released on drop, including when the client goes away mid-fetch.
            let flight = state.inflight.begin(key);
            state
                .discovery
                .fetch_discover_page_cancellable(&req, flight.token())
                .await?
        }
        None => state.discovery.fetch_discover_page(&req).await?,
    };

    tracing::debug!(
        kind = ?req.kind,
        query = ?req.query,
        page = feed.page,
        results = feed.results.len(),
        "discover page served"
    );
    Ok(Json(feed.into()))
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    page: Option<u32>,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<FeedResponse>, AppError> {
    let page = page_param(params.page)?;
    Ok(Json(state.discovery.search(&params.q, page).await?.into()))
}

#[derive(Deserialize)]
struct SuggestionParams {
    #[serde(default)]
    q: String,
    limit: Option<usize>,
}

async fn search_suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<Vec<SearchSuggestion>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_SUGGESTION_LIMIT)
        .clamp(1, MAX_SUGGESTIONS);
    Ok(Json(
        state.discovery.search_suggestions(&params.q, limit).await?,
    ))
}

// ---------------------------------------------------------------------------
// Anime
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct AnimeListParams {
    #[serde(rename = "type")]
    query: Option<DiscoverQuery>,
    page: Option<u32>,
    limit: Option<u32>,
}

fn anime_cursor(page: Option<u32>, limit: Option<u32>) -> Result<PageCursor, ApiError> {
    let page = page_param(page)?;
    let limit = limit.unwrap_or(DEFAULT_ANIME_LIMIT).clamp(1, MAX_LIMIT);
    Ok(PageCursor::new(page, limit))
}

async fn anime_list(
    State(state): State<AppState>,
    Query(params): Query<AnimeListParams>,
) -> Result<Json<FeedResponse>, AppError> {
    let cursor = anime_cursor(params.page, params.limit)?;
    let query = params.query.unwrap_or(DiscoverQuery::TopRated);
    Ok(Json(state.discovery.anime_list(query, cursor).await?.into()))
}

#[derive(Deserialize)]
struct AnimeSearchParams {
    #[serde(default)]
    q: String,
    page: Option<u32>,
    limit: Option<u32>,
}

async fn anime_search(
    State(state): State<AppState>,
    Query(params): Query<AnimeSearchParams>,
) -> Result<Json<FeedResponse>, AppError> {
    let cursor = anime_cursor(params.page, params.limit)?;
    Ok(Json(
        state.discovery.search_anime(&params.q, cursor).await?.into(),
    ))
}

async fn anime_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnimeDetails>, AppError> {
    let id = parse_id(&id, "anime")?;
    Ok(Json(state.discovery.anime_details(id).await?))
}

#[derive(Serialize)]
struct AniListIdResponse {
    mal_id: u64,
    anilist_id: Option<u64>,
}

/// Cross-reference a MyAnimeList id to AniList. An unknown mapping is
/// reported as `null`, not as an error.
async fn anime_anilist_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AniListIdResponse>, AppError> {
    let mal_id = parse_id(&id, "anime")?;
    let anilist_id = state.id_mapper.anilist_id(mal_id).await;
    Ok(Json(AniListIdResponse { mal_id, anilist_id }))
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct PlayersResponse {
    target: PlaybackTarget,
    sources: Vec<PlayerSource>,
}

#[derive(Deserialize)]
struct PlayerParams {
    start_at: Option<u32>,
}

#[derive(Deserialize)]
struct AnimePlayerParams {
    #[serde(default)]
    audio: AudioTrack,
    start_at: Option<u32>,
}

fn players(target: PlaybackTarget, start_at: Option<u32>) -> Json<PlayersResponse> {
    let sources = reelmix_players::resolve(&target, start_at);
    tracing::debug!(
        kind = %target.media_kind(),
        sources = sources.len(),
        resume = start_at.is_some(),
        "player sources resolved"
    );
    Json(PlayersResponse { target, sources })
}

async fn movie_players(
    Path(id): Path<String>,
    Query(params): Query<PlayerParams>,
) -> Result<Json<PlayersResponse>, AppError> {
    let id = parse_id(&id, "movie")?;
    Ok(players(PlaybackTarget::Movie { id }, params.start_at))
}

async fn tv_players(
    Path((id, season, episode)): Path<(String, String, String)>,
    Query(params): Query<PlayerParams>,
) -> Result<Json<PlayersResponse>, AppError> {
    let target = PlaybackTarget::TvEpisode {
        id: parse_id(&id, "show")?,
        // Season 0 holds specials.
        season: parse_number(&season, "season", 0)?,
        episode: parse_number(&episode, "episode", 1)?,
    };
    Ok(players(target, params.start_at))
}

async fn anime_players(
    Path((id, episode)): Path<(String, String)>,
    Query(params): Query<AnimePlayerParams>,
) -> Result<Json<PlayersResponse>, AppError> {
    let target = PlaybackTarget::AnimeEpisode {
        id: parse_id(&id, "anime")?,
        episode: parse_number(&episode, "episode", 1)?,
        audio: params.audio,
    };
    Ok(players(target, params.start_at))
}
