//! MyAnimeList catalog client.
//!
//! Uses the MAL API v2 with client-id authentication (`X-MAL-CLIENT-ID`).
//! Lists are offset paginated and only report whether a next page exists.

use reelmix_core::types::{CatalogItem, MediaKind};

use crate::http::{JsonTransport, Lookup};
use crate::provider::{
    AnimeCatalog, AnimeDetails, AnimeFeed, RankingType, Season, SeasonSort, StartSeason,
};
use crate::{CatalogError, ClientConfig, Upstream};

pub const BASE_URL: &str = "https://api.myanimelist.net/v2";

const CLIENT_ID_HEADER: &str = "X-MAL-CLIENT-ID";

const LIST_FIELDS: &str = "id,title,main_picture,alternative_titles,start_date,synopsis,mean,rank,popularity,num_episodes,media_type,status,genres,rating,nsfw";

const DETAIL_FIELDS: &str = "id,title,main_picture,alternative_titles,start_date,end_date,synopsis,mean,rank,popularity,num_list_users,num_scoring_users,nsfw,media_type,status,genres,num_episodes,start_season,broadcast,source,average_episode_duration,rating,pictures,background,related_anime{node{id,title,main_picture,mean,start_date,nsfw}},recommendations{node{id,title,main_picture,mean,start_date,nsfw}},studios";

pub struct MalClient {
    client_id: String,
    transport: JsonTransport,
}

impl MalClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            transport: JsonTransport::new("MAL", &config),
            client_id: config.credential,
        }
    }

    async fn get_json(
        &self,
        lookup: Lookup,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, CatalogError> {
        self.transport
            .get_json(
                Upstream::Anime,
                lookup,
                path,
                params,
                &[(CLIENT_ID_HEADER, self.client_id.as_str())],
            )
            .await
    }

    async fn get_list(
        &self,
        path: &str,
        mut params: Vec<(&str, String)>,
        limit: u32,
        offset: u32,
    ) -> Result<AnimeFeed, CatalogError> {
        params.push(("limit", limit.to_string()));
        params.push(("offset", offset.to_string()));
        params.push(("fields", LIST_FIELDS.to_string()));
        let data = self.get_json(Lookup::Listing, path, &params).await?;
        Ok(parse_list(&data))
    }
}

#[async_trait::async_trait]
impl AnimeCatalog for MalClient {
    fn name(&self) -> &str {
        "mal"
    }

    async fn ranking(
        &self,
        ranking: RankingType,
        limit: u32,
        offset: u32,
    ) -> Result<AnimeFeed, CatalogError> {
        self.get_list(
            "/anime/ranking",
            vec![("ranking_type", ranking.as_str().to_string())],
            limit,
            offset,
        )
        .await
    }

    async fn season(
        &self,
        year: i32,
        season: Season,
        sort: SeasonSort,
        limit: u32,
        offset: u32,
    ) -> Result<AnimeFeed, CatalogError> {
        self.get_list(
            &format!("/anime/season/{year}/{}", season.as_str()),
            vec![("sort", sort.as_str().to_string())],
            limit,
            offset,
        )
        .await
    }

    async fn search(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<AnimeFeed, CatalogError> {
        self.get_list("/anime", vec![("q", query.to_string())], limit, offset)
            .await
    }

    async fn details(&self, id: u64) -> Result<AnimeDetails, CatalogError> {
        let data = self
            .get_json(
                Lookup::Record,
                &format!("/anime/{id}"),
                &[("fields", DETAIL_FIELDS.to_string())],
            )
            .await?;

        parse_details(&data).ok_or(CatalogError::NotFound)
    }
}

pub(crate) fn parse_list(data: &serde_json::Value) -> AnimeFeed {
    let items = data["data"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| parse_node(&entry["node"]))
                .collect()
        })
        .unwrap_or_default();

    AnimeFeed {
        items,
        has_next: data["paging"]["next"].as_str().is_some(),
    }
}

pub(crate) fn parse_node(node: &serde_json::Value) -> Option<CatalogItem> {
    let picture = &node["main_picture"];
    let large = picture["large"].as_str().map(|s| s.to_string());

    Some(CatalogItem {
        id: node["id"].as_u64()?,
        media_kind: MediaKind::Anime,
        title: node["title"].as_str().unwrap_or("Unknown").to_string(),
        overview: node["synopsis"].as_str().map(|s| s.to_string()),
        poster_path: large
            .clone()
            .or_else(|| picture["medium"].as_str().map(|s| s.to_string())),
        // No backdrops on MAL; reuse the large poster.
        backdrop_path: large,
        release_date: node["start_date"].as_str().map(|s| s.to_string()),
        rating: node["mean"].as_f64().unwrap_or(0.0) / 10.0,
        adult: matches!(node["nsfw"].as_str(), Some("black") | Some("gray")),
    })
}

/// Provider counts are non-negative; out-of-range values saturate.
fn count(value: &serde_json::Value) -> Option<u32> {
    value.as_u64().map(|n| u32::try_from(n).unwrap_or(u32::MAX))
}

fn parse_details(data: &serde_json::Value) -> Option<AnimeDetails> {
    let item = parse_node(data)?;

    let alt = &data["alternative_titles"];
    let mut alternative_titles: Vec<String> = alt["synonyms"]
        .as_array()
        .map(|s| {
            s.iter()
                .filter_map(|t| t.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default();
    for key in ["en", "ja"] {
        if let Some(t) = alt[key].as_str().filter(|t| !t.is_empty()) {
            alternative_titles.push(t.to_string());
        }
    }

    let names = |key: &str| -> Vec<String> {
        data[key]
            .as_array()
            .map(|xs| {
                xs.iter()
                    .filter_map(|x| x["name"].as_str().map(|s| s.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    };

    let nodes = |key: &str| -> Vec<CatalogItem> {
        data[key]
            .as_array()
            .map(|xs| xs.iter().filter_map(|x| parse_node(&x["node"])).collect())
            .unwrap_or_default()
    };

    let start_season = data["start_season"]["year"]
        .as_i64()
        .zip(data["start_season"]["season"].as_str().and_then(Season::parse))
        .and_then(|(year, season)| {
            Some(StartSeason {
                year: i32::try_from(year).ok()?,
                season,
            })
        });

    Some(AnimeDetails {
        alternative_titles,
        synopsis: data["synopsis"].as_str().map(|s| s.to_string()),
        mean: data["mean"].as_f64(),
        rank: count(&data["rank"]),
        popularity: count(&data["popularity"]),
        num_episodes: count(&data["num_episodes"]).filter(|n| *n > 0),
        status: data["status"].as_str().map(|s| s.to_string()),
        format: data["media_type"].as_str().map(|s| s.to_string()),
        genres: names("genres"),
        studios: names("studios"),
        start_season,
        source: data["source"].as_str().map(|s| s.to_string()),
        average_episode_duration: count(&data["average_episode_duration"]),
        age_rating: data["rating"].as_str().map(|s| s.to_string()),
        pictures: data["pictures"]
            .as_array()
            .map(|ps| {
                ps.iter()
                    .filter_map(|p| p["large"].as_str().or_else(|| p["medium"].as_str()))
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default(),
        related: nodes("related_anime"),
        recommendations: nodes("recommendations"),
        item,
    })
}
