//! Interleaving of per-source result pages into one feed.
//!
//! Movie/TV results are dense, anime results sparse; the merged page takes
//! two dense items for every sparse one and falls through to whichever list
//! still has items once the other runs out.

/// Merge dense and sparse results in a repeating (dense, dense, sparse) pattern.
///
/// Relative order within each input is preserved. If either input is empty
/// the output is the other input unchanged.
pub fn interleave<T>(dense: Vec<T>, sparse: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(dense.len() + sparse.len());
    let mut dense = dense.into_iter().peekable();
    let mut sparse = sparse.into_iter().peekable();

    while dense.peek().is_some() || sparse.peek().is_some() {
        out.extend(dense.by_ref().take(2));
        out.extend(sparse.next());
    }

    out
}

/// Alternate movie and TV results by index, movie first.
pub fn zip_alternate<T>(movies: Vec<T>, shows: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(movies.len() + shows.len());
    let mut movies = movies.into_iter();
    let mut shows = shows.into_iter();

    loop {
        let (m, s) = (movies.next(), shows.next());
        if m.is_none() && s.is_none() {
            break;
        }
        out.extend(m);
        out.extend(s);
    }

    out
}
