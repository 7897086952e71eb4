//! Embed URL templates, one table per playback target.

use reelmix_core::types::PlayerSource;

const VIDLINK_COLORS: &str = "primaryColor=7bfb76&secondaryColor=a2a2a2&iconColor=eefdec";

fn source(title: &str, url: String) -> PlayerSource {
    PlayerSource {
        title: title.to_string(),
        source_url: url,
        ads: false,
        fast: false,
        recommended: false,
        resumable: false,
    }
}

trait Flags {
    fn ads(self) -> Self;
    fn fast(self) -> Self;
    fn recommended(self) -> Self;
    fn resumable(self) -> Self;
}

impl Flags for PlayerSource {
    fn ads(mut self) -> Self {
        self.ads = true;
        self
    }

    fn fast(mut self) -> Self {
        self.fast = true;
        self
    }

    fn recommended(mut self) -> Self {
        self.recommended = true;
        self
    }

    fn resumable(mut self) -> Self {
        self.resumable = true;
        self
    }
}

/// `&startAt=N`, or nothing without a start position.
fn start(start_at: Option<u32>) -> String {
    start_at.map(|s| format!("&startAt={s}")).unwrap_or_default()
}

pub fn movie(id: u64, start_at: Option<u32>) -> Vec<PlayerSource> {
    let at = start(start_at);
    vec![
        source(
            "VidSrc",
            format!("https://vidsrc.cc/v2/embed/movie/{id}?autoplay=false{at}"),
        )
        .fast()
        .recommended()
        .resumable(),
        source(
            "VidLink",
            format!("https://vidlink.pro/movie/{id}?primaryColor=7bfb76&autoplay=false{at}"),
        )
        .ads()
        .fast()
        .recommended()
        .resumable(),
        source("AutoEmbed 1", format!("https://autoembed.co/movie/tmdb/{id}"))
            .fast()
            .recommended()
            .resumable(),
        // VidKing saves progress but sticks at a passed start position, so none is sent.
        source(
            "VidKing",
            format!("https://www.vidking.net/embed/movie/{id}?color=006fee&autoplay=false"),
        )
        .fast()
        .recommended()
        .resumable(),
        source("<Embed>", format!("https://embed.su/embed/movie/{id}")).ads(),
        source(
            "SuperEmbed",
            format!("https://multiembed.mov/directstream.php?video_id={id}&tmdb=1"),
        )
        .ads()
        .fast(),
        source("FilmKu", format!("https://filmku.stream/embed/{id}")).ads(),
        source("NontonGo", format!("https://www.nontongo.win/embed/movie/{id}")).ads(),
        source(
            "AutoEmbed 2",
            format!("https://player.autoembed.cc/embed/movie/{id}"),
        )
        .ads(),
        source("2Embed", format!("https://www.2embed.cc/embed/{id}")).ads(),
        source("VidSrc 1", format!("https://vidsrc.xyz/embed/movie/{id}")).ads(),
        source("VidSrc 2", format!("https://vidsrc.to/embed/movie/{id}")).ads(),
        source("VidSrc 3", format!("https://vidsrc.icu/embed/movie/{id}")).ads(),
        source(
            "VidSrc 4",
            format!("https://vidsrc.cc/v2/embed/movie/{id}?autoPlay=false"),
        )
        .ads(),
        source(
            "VidSrc 5",
            format!("https://vidsrc.cc/v3/embed/movie/{id}?autoPlay=false"),
        )
        .ads()
        .fast()
        .recommended(),
        source("MoviesAPI", format!("https://moviesapi.club/movie/{id}")).ads(),
    ]
}

pub fn tv_episode(id: u64, season: u32, episode: u32, start_at: Option<u32>) -> Vec<PlayerSource> {
    let at = start(start_at);
    let path = format!("{id}/{season}/{episode}");
    vec![
        source(
            "VidSrc",
            format!("https://vidsrc.cc/v2/embed/tv/{path}?autoplay=true{at}"),
        )
        .fast()
        .recommended()
        .resumable(),
        source(
            "VidLink",
            format!("https://vidlink.pro/tv/{path}?player=jw&{VIDLINK_COLORS}&autoplay=false{at}"),
        )
        .ads()
        .fast()
        .recommended()
        .resumable(),
        source(
            "AutoEmbed 1",
            format!("https://autoembed.co/tv/tmdb/{id}-{season}-{episode}"),
        )
        .fast()
        .recommended()
        .resumable(),
        source(
            "VidKing",
            format!("https://www.vidking.net/embed/tv/{path}?color=f5a524&autoplay=false"),
        )
        .fast()
        .recommended()
        .resumable(),
        source(
            "VidLink 2",
            format!("https://vidlink.pro/tv/{path}?primaryColor=7bfb76&autoplay=false{at}"),
        )
        .ads()
        .fast()
        .recommended()
        .resumable(),
        source("<Embed>", format!("https://embed.su/embed/tv/{path}")).ads(),
        source(
            "SuperEmbed",
            format!(
                "https://multiembed.mov/directstream.php?video_id={id}&tmdb=1&s={season}&e={episode}"
            ),
        )
        .ads()
        .fast(),
        source(
            "FilmKu",
            format!("https://filmku.stream/embed/series?tmdb={id}&sea={season}&epi={episode}"),
        )
        .ads(),
        source("NontonGo", format!("https://www.nontongo.win/embed/tv/{path}")).ads(),
        source(
            "AutoEmbed 2",
            format!("https://player.autoembed.cc/embed/tv/{path}"),
        )
        .ads(),
        source(
            "2Embed",
            format!("https://www.2embed.cc/embedtv/{id}&s={season}&e={episode}"),
        )
        .ads(),
        source("VidSrc 1", format!("https://vidsrc.xyz/embed/tv/{path}")).ads(),
        source("VidSrc 2", format!("https://vidsrc.to/embed/tv/{path}")).ads(),
        source("VidSrc 3", format!("https://vidsrc.icu/embed/tv/{path}")).ads(),
        source(
            "VidSrc 4",
            format!("https://vidsrc.cc/v2/embed/tv/{path}?autoPlay=false"),
        )
        .ads(),
        source(
            "VidSrc 5",
            format!("https://vidsrc.cc/v3/embed/tv/{path}?autoPlay=false"),
        )
        .ads()
        .fast()
        .recommended(),
        source(
            "MoviesAPI",
            format!("https://moviesapi.club/tv/{id}-{season}-{episode}"),
        )
        .ads(),
    ]
}

pub fn anime_sub(id: u64, episode: u32, start_at: Option<u32>) -> Vec<PlayerSource> {
    let at = start(start_at);
    vec![
        source(
            "VidLink Sub",
            format!("https://vidlink.pro/anime/{id}/{episode}/sub?{VIDLINK_COLORS}&autoplay=false{at}"),
        )
        .ads()
        .fast()
        .recommended()
        .resumable(),
        source(
            "VidSrc Sub",
            format!(
                "https://vidsrc.cc/v2/embed/anime/{id}/{episode}/sub?autoPlay=false&autoSkipIntro=true"
            ),
        )
        .ads()
        .fast(),
        source("2Anime Sub", format!("https://2anime.xyz/embed/{id}-{episode}")).ads(),
        source("AllAnime", format!("https://allanime.day/anime/{id}/{episode}")).ads(),
    ]
}

pub fn anime_dub(id: u64, episode: u32, start_at: Option<u32>) -> Vec<PlayerSource> {
    let at = start(start_at);
    vec![
        source(
            "VidLink Dub",
            format!(
                "https://vidlink.pro/anime/{id}/{episode}/dub?fallback=true&{VIDLINK_COLORS}&autoplay=false{at}"
            ),
        )
        .ads()
        .fast()
        .recommended()
        .resumable(),
        source(
            "VidSrc Dub",
            format!(
                "https://vidsrc.cc/v2/embed/anime/{id}/{episode}/dub?autoPlay=false&autoSkipIntro=true"
            ),
        )
        .ads()
        .fast(),
    ]
}
