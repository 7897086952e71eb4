//! Third-party embed player resolution.
//!
//! Pure URL templating: nothing here checks that an embed actually serves the
//! requested title. The returned order is the display and fallback order.

pub mod sources;

use reelmix_core::types::{AudioTrack, MediaKind, PlayerSource};
use serde::{Deserialize, Serialize};

/// What to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaybackTarget {
    /// TMDB movie id.
    Movie { id: u64 },
    /// TMDB show id plus season/episode numbers.
    TvEpisode { id: u64, season: u32, episode: u32 },
    /// MyAnimeList id plus episode number.
    AnimeEpisode {
        id: u64,
        episode: u32,
        audio: AudioTrack,
    },
}

impl PlaybackTarget {
    pub fn media_kind(&self) -> MediaKind {
        match self {
            Self::Movie { .. } => MediaKind::Movie,
            Self::TvEpisode { .. } => MediaKind::Tv,
            Self::AnimeEpisode { .. } => MediaKind::Anime,
        }
    }
}

/// Candidate embeds for `target`, first entry being the default selection.
///
/// `start_at` (seconds) is only passed to embeds that accept a resume position.
pub fn resolve(target: &PlaybackTarget, start_at: Option<u32>) -> Vec<PlayerSource> {
    match *target {
        PlaybackTarget::Movie { id } => sources::movie(id, start_at),
        PlaybackTarget::TvEpisode {
            id,
            season,
            episode,
        } => sources::tv_episode(id, season, episode, start_at),
        PlaybackTarget::AnimeEpisode { id, episode, audio } => match audio {
            AudioTrack::Sub => sources::anime_sub(id, episode, start_at),
            AudioTrack::Dub => sources::anime_dub(id, episode, start_at),
        },
    }
}

/// Every distinct embed origin (`scheme://host`), lowercased, in first-seen order.
pub fn embed_hosts() -> Vec<String> {
    let samples = [
        PlaybackTarget::Movie { id: 1 },
        PlaybackTarget::TvEpisode {
            id: 1,
            season: 1,
            episode: 1,
        },
        PlaybackTarget::AnimeEpisode {
            id: 1,
            episode: 1,
            audio: AudioTrack::Sub,
        },
        PlaybackTarget::AnimeEpisode {
            id: 1,
            episode: 1,
            audio: AudioTrack::Dub,
        },
    ];

    let mut hosts: Vec<String> = Vec::new();
    for target in &samples {
        for source in resolve(target, None) {
            if let Some(origin) = origin(&source.source_url) {
                if !hosts.contains(&origin) {
                    hosts.push(origin);
                }
            }
        }
    }
    hosts
}

fn origin(url: &str) -> Option<String> {
    let (scheme, rest) = url.split_once("://")?;
    let host = rest.split(['/', '?']).next().filter(|h| !h.is_empty())?;
    Some(format!("{scheme}://{}", host.to_ascii_lowercase()))
}
