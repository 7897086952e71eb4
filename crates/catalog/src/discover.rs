//! Discovery service: fans out to the catalogs, merges, and paginates.
//!
//! Movie and TV sources are required: if either fails the page fails. The
//! anime source is best-effort inside a multi-kind page and degrades to an
//! empty contribution; on its own (`kind = anime`) it is required.

use std::sync::Arc;

use reelmix_core::types::{CatalogItem, PaginatedFeed, SearchSuggestion};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cursor::{PageCursor, SourceProgress, continuation};
use crate::merge::{interleave, zip_alternate};
use crate::provider::{
    AnimeCatalog, AnimeDetails, AnimeFeed, MovieTvCatalog, RankingType, ScreenKind, SeasonSort,
    TimeWindow, TrendingScope, current_season,
};
use crate::suggest::{dedup_suggestions, suggestion_from_item};
use crate::tmdb::MAX_PAGES;
use crate::{CatalogError, Upstream};

pub const DEFAULT_ANIME_LIMIT: u32 = 20;
/// Anime page size inside a multi page, next to two full movie/TV pages.
pub const DEFAULT_MULTI_ANIME_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoverKind {
    Movie,
    Tv,
    Anime,
    #[default]
    Multi,
}

/// Which list a discover page is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscoverQuery {
    #[default]
    Discover,
    TodayTrending,
    ThisWeekTrending,
    Popular,
    TopRated,
    Airing,
    Upcoming,
    Seasonal,
}

impl DiscoverQuery {
    fn trending_window(self) -> Option<TimeWindow> {
        match self {
            Self::TodayTrending => Some(TimeWindow::Day),
            Self::ThisWeekTrending => Some(TimeWindow::Week),
            _ => None,
        }
    }

    fn anime_ranking(self) -> Option<RankingType> {
        match self {
            Self::TopRated => Some(RankingType::All),
            Self::Popular | Self::TodayTrending | Self::ThisWeekTrending => {
                Some(RankingType::ByPopularity)
            }
            Self::Airing => Some(RankingType::Airing),
            Self::Upcoming => Some(RankingType::Upcoming),
            Self::Discover | Self::Seasonal => None,
        }
    }

    /// Anime list paired with this query inside a multi page. Airing and
    /// upcoming have no multi counterpart and use the seasonal list.
    fn multi_anime_query(self) -> Self {
        match self {
            Self::Airing | Self::Upcoming => Self::Discover,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiscoverRequest {
    pub kind: DiscoverKind,
    pub query: DiscoverQuery,
    pub page: u32,
    /// Anime page size; movie/TV pages have a fixed provider size.
    pub limit: Option<u32>,
    /// Comma-separated movie/TV genre ids. Anime is skipped when present.
    pub genres: Option<String>,
}

impl DiscoverRequest {
    fn genres(&self) -> Option<&str> {
        self.genres.as_deref().filter(|g| !g.trim().is_empty())
    }

    fn cursor(&self) -> PageCursor {
        let default = match self.kind {
            DiscoverKind::Multi => DEFAULT_MULTI_ANIME_LIMIT,
            _ => DEFAULT_ANIME_LIMIT,
        };
        PageCursor::new(self.page, self.limit.unwrap_or(default).clamp(1, MAX_LIMIT))
    }
}

#[derive(Clone)]
pub struct DiscoveryService {
    movie_tv: Arc<dyn MovieTvCatalog>,
    anime: Arc<dyn AnimeCatalog>,
}

impl DiscoveryService {
    pub fn new(movie_tv: Arc<dyn MovieTvCatalog>, anime: Arc<dyn AnimeCatalog>) -> Self {
        Self { movie_tv, anime }
    }

    /// Fetch one logical page of the requested feed.
    pub async fn fetch_discover_page(
        &self,
        req: &DiscoverRequest,
    ) -> Result<PaginatedFeed, CatalogError> {
        if req.page == 0 {
            return Err(CatalogError::InvalidRequest("page must be at least 1".into()));
        }

        match req.kind {
            DiscoverKind::Movie => self.fetch_screen(ScreenKind::Movie, req).await,
            DiscoverKind::Tv => self.fetch_screen(ScreenKind::Tv, req).await,
            DiscoverKind::Anime => {
                if req.genres().is_some() {
                    debug!("genre filter ignored for anime discover");
                }
                self.anime_list(req.query, req.cursor()).await
            }
            DiscoverKind::Multi => self.fetch_multi(req).await,
        }
    }

    /// Like [`Self::fetch_discover_page`], abandoning upstream work once `token` fires.
    pub async fn fetch_discover_page_cancellable(
        &self,
        req: &DiscoverRequest,
        token: &CancellationToken,
    ) -> Result<PaginatedFeed, CatalogError> {
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(CatalogError::Cancelled),
            res = self.fetch_discover_page(req) => res,
        }
    }

    async fn fetch_screen(
        &self,
        kind: ScreenKind,
        req: &DiscoverRequest,
    ) -> Result<PaginatedFeed, CatalogError> {
        match req.query.trending_window() {
            Some(window) => {
                let scope = match kind {
                    ScreenKind::Movie => TrendingScope::Movie,
                    ScreenKind::Tv => TrendingScope::Tv,
                };
                self.movie_tv.trending(scope, window, req.page).await
            }
            None => self.movie_tv.discover(kind, req.page, req.genres()).await,
        }
    }

    async fn fetch_multi(&self, req: &DiscoverRequest) -> Result<PaginatedFeed, CatalogError> {
        let cursor = req.cursor();
        let genres = req.genres();

        let screen = self.fetch_screen_mixed(req.query, req.page, genres);
        let anime = async {
            if genres.is_some() {
                return (Vec::new(), SourceProgress::Skipped);
            }
            match self.fetch_anime(req.query.multi_anime_query(), cursor).await {
                Ok(feed) => (feed.items, SourceProgress::Linked { has_next: feed.has_next }),
                Err(e) => {
                    warn!(
                        upstream = %Upstream::Anime,
                        provider = self.anime.name(),
                        page = req.page,
                        error = %e,
                        "anime source degraded, continuing without it"
                    );
                    (Vec::new(), SourceProgress::Skipped)
                }
            }
        };

        let (screen, (anime_items, anime_progress)) = futures::join!(screen, anime);
        let (screen_items, mut progress) = screen?;
        progress.push(anime_progress);

        debug!(
            page = req.page,
            screen = screen_items.len(),
            anime = anime_items.len(),
            "merged discover page"
        );

        let cont = continuation(req.page, &progress);
        Ok(PaginatedFeed {
            page: req.page,
            results: interleave(screen_items, anime_items),
            total_pages: cont.total_pages,
            has_next_page: cont.has_next_page,
        })
    }

    /// Movie and TV results for a multi page, alternated movie first.
    async fn fetch_screen_mixed(
        &self,
        query: DiscoverQuery,
        page: u32,
        genres: Option<&str>,
    ) -> Result<(Vec<CatalogItem>, Vec<SourceProgress>), CatalogError> {
        // Past the provider ceiling only the anime side can still have pages.
        if page > MAX_PAGES {
            debug!(
                provider = self.movie_tv.name(),
                page, "movie/TV exhausted at page ceiling"
            );
            return Ok((Vec::new(), vec![SourceProgress::Skipped]));
        }

        if let Some(window) = query.trending_window() {
            let feed = self
                .movie_tv
                .trending(TrendingScope::All, window, page)
                .await?;
            let progress = SourceProgress::Numbered {
                page: feed.page,
                total_pages: feed.total_pages,
            };
            return Ok((feed.results, vec![progress]));
        }

        let (movies, shows) = futures::try_join!(
            self.movie_tv.discover(ScreenKind::Movie, page, genres),
            self.movie_tv.discover(ScreenKind::Tv, page, genres),
        )?;

        let progress = vec![
            SourceProgress::Numbered {
                page: movies.page,
                total_pages: movies.total_pages,
            },
            SourceProgress::Numbered {
                page: shows.page,
                total_pages: shows.total_pages,
            },
        ];
        Ok((zip_alternate(movies.results, shows.results), progress))
    }

    async fn fetch_anime(
        &self,
        query: DiscoverQuery,
        cursor: PageCursor,
    ) -> Result<AnimeFeed, CatalogError> {
        match query.anime_ranking() {
            Some(ranking) => {
                self.anime
                    .ranking(ranking, cursor.limit, cursor.offset())
                    .await
            }
            None => {
                let (year, season) = current_season();
                self.anime
                    .season(year, season, SeasonSort::Score, cursor.limit, cursor.offset())
                    .await
            }
        }
    }

    /// Anime-only feed for a list type.
    pub async fn anime_list(
        &self,
        query: DiscoverQuery,
        cursor: PageCursor,
    ) -> Result<PaginatedFeed, CatalogError> {
        let feed = self.fetch_anime(query, cursor).await?;
        Ok(anime_page(cursor.page, feed))
    }

    pub async fn search_anime(
        &self,
        query: &str,
        cursor: PageCursor,
    ) -> Result<PaginatedFeed, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(PaginatedFeed::empty(cursor.page));
        }
        let feed = self
            .anime
            .search(query, cursor.limit, cursor.offset())
            .await?;
        Ok(anime_page(cursor.page, feed))
    }

    pub async fn anime_details(&self, id: u64) -> Result<AnimeDetails, CatalogError> {
        self.anime.details(id).await
    }

    /// Movie/TV search results.
    pub async fn search(&self, query: &str, page: u32) -> Result<PaginatedFeed, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(PaginatedFeed::empty(page.max(1)));
        }
        self.movie_tv.search(query, page).await
    }

    /// Deduplicated movie/TV suggestions for a partial query.
    pub async fn search_suggestions(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchSuggestion>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let feed = self.movie_tv.search(query, 1).await?;
        let suggestions = feed
            .results
            .iter()
            .filter_map(suggestion_from_item)
            .collect();
        Ok(dedup_suggestions(suggestions, limit))
    }
}

fn anime_page(page: u32, feed: AnimeFeed) -> PaginatedFeed {
    let cont = continuation(page, &[SourceProgress::Linked { has_next: feed.has_next }]);
    PaginatedFeed {
        page,
        results: feed.items,
        total_pages: cont.total_pages,
        has_next_page: cont.has_next_page,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use reelmix_core::types::MediaKind;

    use super::*;
    use crate::provider::Season;

    fn item(id: u64, kind: MediaKind, title: &str) -> CatalogItem {
        CatalogItem {
            id,
            media_kind: kind,
            title: title.into(),
            overview: None,
            poster_path: None,
            backdrop_path: None,
            release_date: Some("2020-01-01".into()),
            rating: 0.7,
            adult: false,
        }
    }

    fn feed(page: u32, total_pages: u32, results: Vec<CatalogItem>) -> PaginatedFeed {
        PaginatedFeed {
            page,
            results,
            total_pages,
            has_next_page: page < total_pages,
        }
    }

    #[derive(Default)]
    struct FakeScreen {
        fail_movie: bool,
        fail_tv: bool,
        movie_total: u32,
        tv_total: u32,
        search_results: Vec<CatalogItem>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl MovieTvCatalog for FakeScreen {
        fn name(&self) -> &str {
            "fake-screen"
        }

        async fn discover(
            &self,
            kind: ScreenKind,
            page: u32,
            genres: Option<&str>,
        ) -> Result<PaginatedFeed, CatalogError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("discover:{}:{page}:{genres:?}", kind.as_str()));
            match kind {
                ScreenKind::Movie if self.fail_movie => {
                    Err(CatalogError::upstream(Upstream::Movie, "TMDB returned 503"))
                }
                ScreenKind::Tv if self.fail_tv => {
                    Err(CatalogError::upstream(Upstream::Tv, "TMDB returned 503"))
                }
                ScreenKind::Movie => Ok(feed(
                    page,
                    self.movie_total,
                    vec![
                        item(1, MediaKind::Movie, "m1"),
                        item(2, MediaKind::Movie, "m2"),
                        item(3, MediaKind::Movie, "m3"),
                    ],
                )),
                ScreenKind::Tv => Ok(feed(
                    page,
                    self.tv_total,
                    vec![item(1, MediaKind::Tv, "s1"), item(2, MediaKind::Tv, "s2")],
                )),
            }
        }

        async fn trending(
            &self,
            scope: TrendingScope,
            window: TimeWindow,
            page: u32,
        ) -> Result<PaginatedFeed, CatalogError> {
            self.calls.lock().unwrap().push(format!(
                "trending:{}:{}:{page}",
                scope.as_str(),
                window.as_str()
            ));
            Ok(feed(
                page,
                1000,
                vec![item(9, MediaKind::Movie, "hot"), item(8, MediaKind::Tv, "show")],
            ))
        }

        async fn search(&self, query: &str, _page: u32) -> Result<PaginatedFeed, CatalogError> {
            self.calls.lock().unwrap().push(format!("search:{query}"));
            Ok(feed(1, 1, self.search_results.clone()))
        }
    }

    #[derive(Default)]
    struct FakeAnime {
        fail: bool,
        has_next: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeAnime {
        fn page(&self) -> Result<AnimeFeed, CatalogError> {
            if self.fail {
                return Err(CatalogError::upstream(Upstream::Anime, "MAL returned 500"));
            }
            Ok(AnimeFeed {
                items: vec![item(1, MediaKind::Anime, "a1"), item(2, MediaKind::Anime, "a2")],
                has_next: self.has_next,
            })
        }
    }

    #[async_trait::async_trait]
    impl AnimeCatalog for FakeAnime {
        fn name(&self) -> &str {
            "fake-anime"
        }

        async fn ranking(
            &self,
            ranking: RankingType,
            limit: u32,
            offset: u32,
        ) -> Result<AnimeFeed, CatalogError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("ranking:{}:{limit}:{offset}", ranking.as_str()));
            self.page()
        }

        async fn season(
            &self,
            _year: i32,
            _season: Season,
            sort: SeasonSort,
            limit: u32,
            offset: u32,
        ) -> Result<AnimeFeed, CatalogError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("season:{}:{limit}:{offset}", sort.as_str()));
            self.page()
        }

        async fn search(
            &self,
            query: &str,
            limit: u32,
            offset: u32,
        ) -> Result<AnimeFeed, CatalogError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("search:{query}:{limit}:{offset}"));
            self.page()
        }

        async fn details(&self, id: u64) -> Result<AnimeDetails, CatalogError> {
            let _ = id;
            Err(CatalogError::NotFound)
        }
    }

    fn service(screen: FakeScreen, anime: FakeAnime) -> (DiscoveryService, Arc<FakeScreen>, Arc<FakeAnime>) {
        let screen = Arc::new(screen);
        let anime = Arc::new(anime);
        (
            DiscoveryService::new(screen.clone(), anime.clone()),
            screen,
            anime,
        )
    }

    fn multi(page: u32) -> DiscoverRequest {
        DiscoverRequest {
            kind: DiscoverKind::Multi,
            page,
            ..Default::default()
        }
    }

    fn labels(feed: &PaginatedFeed) -> Vec<String> {
        feed.results
            .iter()
            .map(|i| format!("{}{}", i.media_kind, i.id))
            .collect()
    }

    #[tokio::test]
    async fn multi_page_interleaves_screen_and_anime() {
        let (svc, _, anime) = service(
            FakeScreen {
                movie_total: 5,
                tv_total: 5,
                ..Default::default()
            },
            FakeAnime::default(),
        );

        let page = svc.fetch_discover_page(&multi(2)).await.unwrap();
        // movies/shows zip to m1 s1 m2 s2 m3, then two of those per anime item
        assert_eq!(
            labels(&page),
            vec!["movie1", "tv1", "anime1", "movie2", "tv2", "anime2", "movie3"]
        );
        assert_eq!(page.page, 2);
        assert!(page.has_next_page);
        assert_eq!(page.total_pages, 5);

        // Discover maps to the current season; multi pages take 10 anime at offset 10.
        let calls = anime.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["season:anime_score:10:10"]);
    }

    #[tokio::test]
    async fn movie_failure_rejects_multi_page() {
        let (svc, _, _) = service(
            FakeScreen {
                fail_movie: true,
                movie_total: 5,
                tv_total: 5,
                ..Default::default()
            },
            FakeAnime::default(),
        );

        let err = svc.fetch_discover_page(&multi(1)).await.unwrap_err();
        match err {
            CatalogError::UpstreamFetchFailed { upstream, .. } => {
                assert_eq!(upstream, Upstream::Movie)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn tv_failure_rejects_multi_page() {
        let (svc, _, _) = service(
            FakeScreen {
                fail_tv: true,
                movie_total: 5,
                tv_total: 5,
                ..Default::default()
            },
            FakeAnime::default(),
        );

        assert!(matches!(
            svc.fetch_discover_page(&multi(1)).await,
            Err(CatalogError::UpstreamFetchFailed { upstream: Upstream::Tv, .. })
        ));
    }

    #[tokio::test]
    async fn anime_failure_degrades_to_empty_contribution() {
        let (svc, _, _) = service(
            FakeScreen {
                movie_total: 5,
                tv_total: 5,
                ..Default::default()
            },
            FakeAnime {
                fail: true,
                ..Default::default()
            },
        );

        let page = svc.fetch_discover_page(&multi(1)).await.unwrap();
        assert_eq!(
            labels(&page),
            vec!["movie1", "tv1", "movie2", "tv2", "movie3"]
        );
        assert!(page.results.iter().all(|i| i.media_kind != MediaKind::Anime));
    }

    #[tokio::test]
    async fn anime_alone_is_required() {
        let (svc, _, _) = service(
            FakeScreen::default(),
            FakeAnime {
                fail: true,
                ..Default::default()
            },
        );

        let req = DiscoverRequest {
            kind: DiscoverKind::Anime,
            page: 1,
            ..Default::default()
        };
        assert!(matches!(
            svc.fetch_discover_page(&req).await,
            Err(CatalogError::UpstreamFetchFailed { upstream: Upstream::Anime, .. })
        ));
    }

    #[tokio::test]
    async fn genre_filter_skips_anime() {
        let (svc, screen, anime) = service(
            FakeScreen {
                movie_total: 3,
                tv_total: 3,
                ..Default::default()
            },
            FakeAnime::default(),
        );

        let req = DiscoverRequest {
            genres: Some("28,12".into()),
            ..multi(1)
        };
        let page = svc.fetch_discover_page(&req).await.unwrap();
        assert_eq!(
            labels(&page),
            vec!["movie1", "tv1", "movie2", "tv2", "movie3"]
        );
        assert!(anime.calls.lock().unwrap().is_empty());
        assert!(
            screen
                .calls
                .lock()
                .unwrap()
                .contains(&"discover:movie:1:Some(\"28,12\")".to_string())
        );
    }

    #[tokio::test]
    async fn exhausted_anime_does_not_end_feed() {
        let (svc, _, _) = service(
            FakeScreen {
                movie_total: 4,
                tv_total: 2,
                ..Default::default()
            },
            FakeAnime {
                has_next: false,
                ..Default::default()
            },
        );

        let page = svc.fetch_discover_page(&multi(2)).await.unwrap();
        assert!(page.has_next_page);
        assert_eq!(page.total_pages, 4);
    }

    #[tokio::test]
    async fn anime_next_pointer_extends_exhausted_screen_feed() {
        let (svc, _, _) = service(
            FakeScreen {
                movie_total: 2,
                tv_total: 2,
                ..Default::default()
            },
            FakeAnime {
                has_next: true,
                ..Default::default()
            },
        );

        let page = svc.fetch_discover_page(&multi(2)).await.unwrap();
        assert!(page.has_next_page);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn multi_past_screen_ceiling_serves_anime_only() {
        let (svc, screen, anime) = service(
            FakeScreen {
                movie_total: 500,
                tv_total: 500,
                ..Default::default()
            },
            FakeAnime {
                has_next: true,
                ..Default::default()
            },
        );

        let last = svc.fetch_discover_page(&multi(500)).await.unwrap();
        assert!(last.has_next_page);
        assert_eq!(last.total_pages, 501);

        let page = svc.fetch_discover_page(&multi(501)).await.unwrap();
        assert_eq!(labels(&page), vec!["anime1", "anime2"]);
        assert!(page.has_next_page);
        assert_eq!(page.total_pages, 502);
        assert_eq!(
            screen.calls.lock().unwrap().clone(),
            vec!["discover:movie:500:None", "discover:tv:500:None"]
        );
        assert_eq!(anime.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn multi_airing_pairs_with_seasonal_anime() {
        let (svc, _, anime) = service(FakeScreen::default(), FakeAnime::default());
        let req = DiscoverRequest {
            query: DiscoverQuery::Airing,
            ..multi(1)
        };
        svc.fetch_discover_page(&req).await.unwrap();
        assert_eq!(
            anime.calls.lock().unwrap().clone(),
            vec!["season:anime_score:10:0"]
        );

        let (svc, _, anime) = service(FakeScreen::default(), FakeAnime::default());
        let req = DiscoverRequest {
            kind: DiscoverKind::Anime,
            query: DiscoverQuery::Airing,
            page: 1,
            ..Default::default()
        };
        svc.fetch_discover_page(&req).await.unwrap();
        assert_eq!(
            anime.calls.lock().unwrap().clone(),
            vec!["ranking:airing:20:0"]
        );
    }

    #[tokio::test]
    async fn trending_multi_uses_single_call_and_popular_anime() {
        let (svc, screen, anime) = service(FakeScreen::default(), FakeAnime::default());

        let req = DiscoverRequest {
            query: DiscoverQuery::ThisWeekTrending,
            ..multi(1)
        };
        let page = svc.fetch_discover_page(&req).await.unwrap();
        assert_eq!(
            labels(&page),
            vec!["movie9", "tv8", "anime1", "anime2"]
        );
        assert_eq!(
            screen.calls.lock().unwrap().clone(),
            vec!["trending:all:week:1"]
        );
        assert_eq!(
            anime.calls.lock().unwrap().clone(),
            vec!["ranking:bypopularity:10:0"]
        );
        assert_eq!(page.total_pages, crate::tmdb::MAX_PAGES);
    }

    #[tokio::test]
    async fn single_kind_trending_uses_scoped_window() {
        let (svc, screen, _) = service(FakeScreen::default(), FakeAnime::default());
        let req = DiscoverRequest {
            kind: DiscoverKind::Tv,
            query: DiscoverQuery::TodayTrending,
            page: 3,
            ..Default::default()
        };
        svc.fetch_discover_page(&req).await.unwrap();
        assert_eq!(
            screen.calls.lock().unwrap().clone(),
            vec!["trending:tv:day:3"]
        );
    }

    #[tokio::test]
    async fn anime_list_uses_limit_and_offset() {
        let (svc, _, anime) = service(
            FakeScreen::default(),
            FakeAnime {
                has_next: true,
                ..Default::default()
            },
        );
        let req = DiscoverRequest {
            kind: DiscoverKind::Anime,
            query: DiscoverQuery::TopRated,
            page: 3,
            limit: Some(500),
            ..Default::default()
        };
        let page = svc.fetch_discover_page(&req).await.unwrap();
        assert!(page.has_next_page);
        assert_eq!(page.total_pages, 4);
        assert_eq!(
            anime.calls.lock().unwrap().clone(),
            vec!["ranking:all:100:200"]
        );
    }

    #[tokio::test]
    async fn page_zero_is_invalid() {
        let (svc, _, _) = service(FakeScreen::default(), FakeAnime::default());
        assert!(matches!(
            svc.fetch_discover_page(&multi(0)).await,
            Err(CatalogError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn cancelled_token_abandons_fetch() {
        let (svc, _, _) = service(FakeScreen::default(), FakeAnime::default());
        let token = CancellationToken::new();
        token.cancel();
        assert!(matches!(
            svc.fetch_discover_page_cancellable(&multi(1), &token).await,
            Err(CatalogError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn suggestions_dedup_and_skip_empty_query() {
        let (svc, screen, _) = service(
            FakeScreen {
                search_results: vec![
                    item(1, MediaKind::Movie, "X"),
                    item(2, MediaKind::Movie, "x"),
                    item(3, MediaKind::Tv, "X"),
                ],
                ..Default::default()
            },
            FakeAnime::default(),
        );

        assert!(svc.search_suggestions("   ", 10).await.unwrap().is_empty());
        assert!(screen.calls.lock().unwrap().is_empty());

        let out = svc.search_suggestions("x", 10).await.unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, 1);
        assert_eq!(out[0].year.as_deref(), Some("2020"));

        let out = svc.search_suggestions("x", 1).await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[tokio::test]
    async fn anime_search_offsets_by_page() {
        let (svc, _, anime) = service(FakeScreen::default(), FakeAnime::default());
        let page = svc
            .search_anime("bebop", PageCursor::new(2, 20))
            .await
            .unwrap();
        assert_eq!(page.results.len(), 2);
        assert!(!page.has_next_page);
        assert_eq!(
            anime.calls.lock().unwrap().clone(),
            vec!["search:bebop:20:20"]
        );
    }
}
