//! Search suggestions: stable dedup then truncate.

use std::collections::HashSet;

use reelmix_core::types::{CatalogItem, MediaKind, SearchSuggestion};

pub const DEFAULT_LIMIT: usize = 10;

/// Suggestion for a movie or TV item; other kinds have no suggestion form.
pub fn suggestion_from_item(item: &CatalogItem) -> Option<SearchSuggestion> {
    if !matches!(item.media_kind, MediaKind::Movie | MediaKind::Tv) {
        return None;
    }
    Some(SearchSuggestion {
        id: item.id,
        title: item.title.clone(),
        media_kind: item.media_kind,
        poster_path: item.poster_path.clone(),
        year: item
            .release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .filter(|y| !y.is_empty())
            .map(|y| y.to_string()),
    })
}

/// Keep the first suggestion per (lowercased title, kind, year), then take `limit`.
///
/// Truncation happens after dedup so duplicates never eat into the limit.
pub fn dedup_suggestions(suggestions: Vec<SearchSuggestion>, limit: usize) -> Vec<SearchSuggestion> {
    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter(|s| seen.insert((s.title.to_lowercase(), s.media_kind, s.year.clone())))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sug(id: u64, title: &str, kind: MediaKind, year: Option<&str>) -> SearchSuggestion {
        SearchSuggestion {
            id,
            title: title.into(),
            media_kind: kind,
            poster_path: None,
            year: year.map(str::to_string),
        }
    }

    fn sample() -> Vec<SearchSuggestion> {
        vec![
            sug(1, "X", MediaKind::Movie, Some("2020")),
            sug(2, "x", MediaKind::Movie, Some("2020")),
            sug(3, "X", MediaKind::Tv, Some("2020")),
        ]
    }

    #[test]
    fn first_occurrence_wins() {
        let out = dedup_suggestions(sample(), DEFAULT_LIMIT);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], sug(1, "X", MediaKind::Movie, Some("2020")));
        assert_eq!(out[1].id, 3);
    }

    #[test]
    fn truncates_after_dedup() {
        let out = dedup_suggestions(sample(), 1);
        assert_eq!(out, vec![sug(1, "X", MediaKind::Movie, Some("2020"))]);

        let mut dupes_first = vec![
            sug(1, "Dune", MediaKind::Movie, Some("2021")),
            sug(2, "DUNE", MediaKind::Movie, Some("2021")),
        ];
        dupes_first.push(sug(3, "Dune", MediaKind::Movie, Some("1984")));
        let out = dedup_suggestions(dupes_first, 2);
        assert_eq!(out.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn different_years_are_distinct() {
        let out = dedup_suggestions(
            vec![
                sug(1, "Solaris", MediaKind::Movie, Some("1972")),
                sug(2, "Solaris", MediaKind::Movie, Some("2002")),
                sug(3, "Solaris", MediaKind::Movie, None),
            ],
            DEFAULT_LIMIT,
        );
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn suggestion_takes_year_prefix() {
        let item = CatalogItem {
            id: 7,
            media_kind: MediaKind::Tv,
            title: "Dark".into(),
            overview: None,
            poster_path: Some("/dark.jpg".into()),
            backdrop_path: None,
            release_date: Some("2017-12-01".into()),
            rating: 0.84,
            adult: false,
        };
        let s = suggestion_from_item(&item).unwrap();
        assert_eq!(s.year.as_deref(), Some("2017"));
        assert_eq!(s.poster_path.as_deref(), Some("/dark.jpg"));

        let anime = CatalogItem {
            media_kind: MediaKind::Anime,
            ..item
        };
        assert!(suggestion_from_item(&anime).is_none());
    }
}
