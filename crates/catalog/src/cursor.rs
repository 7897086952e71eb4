//! Logical page cursor over independently paginated upstreams.
//!
//! The movie/TV provider is page-number based with an authoritative total;
//! the anime provider is offset based and only says whether more exists.

use crate::tmdb::MAX_PAGES;

/// One logical page of the merged feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page: u32,
    pub limit: u32,
}

impl PageCursor {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Native offset for offset-paginated sources.
    pub fn offset(&self) -> u32 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// What one source reported about its remaining data after a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceProgress {
    Numbered { page: u32, total_pages: u32 },
    Linked { has_next: bool },
    /// Source was not queried for this page (filtered out or degraded).
    Skipped,
}

impl SourceProgress {
    pub fn has_more(&self) -> bool {
        match *self {
            Self::Numbered { page, total_pages } => page < total_pages,
            Self::Linked { has_next } => has_next,
            Self::Skipped => false,
        }
    }
}

/// Continuation verdict for a merged page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Continuation {
    pub total_pages: u32,
    pub has_next_page: bool,
}

/// A next logical page exists if any source still has more.
///
/// `total_pages` is the largest numbered total (capped at the provider ceiling),
/// raised to `page + 1` when a linked source still has more, never below `page`.
pub fn continuation(page: u32, sources: &[SourceProgress]) -> Continuation {
    let has_next_page = sources.iter().any(SourceProgress::has_more);

    let mut total_pages = sources
        .iter()
        .filter_map(|s| match *s {
            SourceProgress::Numbered { total_pages, .. } => Some(total_pages.min(MAX_PAGES)),
            _ => None,
        })
        .max()
        .unwrap_or(0)
        .max(page);

    if has_next_page && total_pages <= page {
        total_pages = page + 1;
    }

    Continuation {
        total_pages,
        has_next_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_limit() {
        assert_eq!(PageCursor::new(1, 20).offset(), 0);
        assert_eq!(PageCursor::new(3, 10).offset(), 20);
        assert_eq!(PageCursor::new(0, 0).offset(), 0);
        assert_eq!(PageCursor::new(0, 0).page, 1);
    }

    #[test]
    fn numbered_sources_continue_while_anime_is_exhausted() {
        let c = continuation(
            3,
            &[
                SourceProgress::Numbered { page: 3, total_pages: 10 },
                SourceProgress::Numbered { page: 3, total_pages: 2 },
                SourceProgress::Linked { has_next: false },
            ],
        );
        assert!(c.has_next_page);
        assert_eq!(c.total_pages, 10);
    }

    #[test]
    fn linked_source_alone_extends_feed() {
        let c = continuation(
            7,
            &[
                SourceProgress::Numbered { page: 7, total_pages: 7 },
                SourceProgress::Linked { has_next: true },
            ],
        );
        assert!(c.has_next_page);
        assert_eq!(c.total_pages, 8);
    }

    #[test]
    fn every_source_exhausted_ends_feed() {
        let c = continuation(
            2,
            &[
                SourceProgress::Numbered { page: 2, total_pages: 2 },
                SourceProgress::Skipped,
            ],
        );
        assert!(!c.has_next_page);
        assert_eq!(c.total_pages, 2);
    }

    #[test]
    fn total_is_capped_at_provider_ceiling() {
        let c = continuation(
            1,
            &[SourceProgress::Numbered { page: 1, total_pages: 90_000 }],
        );
        assert_eq!(c.total_pages, MAX_PAGES);
    }
}
