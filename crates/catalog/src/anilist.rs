//! AniList GraphQL lookup of AniList ids from MyAnimeList ids.
//!
//! Several anime embeds key on AniList ids rather than MAL ids.

use tracing::warn;

use crate::http::JsonTransport;
use crate::provider::AnimeIdMapper;
use crate::{CatalogError, ClientConfig, Upstream};

pub const BASE_URL: &str = "https://graphql.anilist.co";

const MEDIA_BY_MAL_ID: &str = "query ($malId: Int) { Media(idMal: $malId, type: ANIME) { id idMal } }";

pub struct AniListClient {
    transport: JsonTransport,
}

impl AniListClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            transport: JsonTransport::new("AniList", &config),
        }
    }

    async fn lookup(&self, mal_id: u64) -> Result<Option<u64>, CatalogError> {
        let body = serde_json::json!({
            "query": MEDIA_BY_MAL_ID,
            "variables": { "malId": mal_id },
        });
        let data = self.transport.post_json(Upstream::AniList, &body).await?;
        Ok(parse_media_id(&data))
    }
}

#[async_trait::async_trait]
impl AnimeIdMapper for AniListClient {
    async fn anilist_id(&self, mal_id: u64) -> Option<u64> {
        match self.lookup(mal_id).await {
            Ok(id) => id,
            Err(e) => {
                warn!(mal_id, error = %e, "AniList id lookup failed");
                None
            }
        }
    }
}

fn parse_media_id(data: &serde_json::Value) -> Option<u64> {
    if let Some(errors) = data.get("errors").filter(|e| !e.is_null()) {
        warn!(?errors, "AniList GraphQL errors");
        return None;
    }
    data["data"]["Media"]["id"].as_u64()
}
