use nucleo::pattern::{CaseMatching, Normalization, Pattern};
use nucleo::{Config, Matcher, Utf32Str};

use crate::models::DirEntry;

/// Longest query the search box accepts (characters)
pub const MAX_QUERY_LEN: usize = 256;

/// How the search box matches entry names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Case-insensitive substring, listing order kept
    #[default]
    Substring,
    /// nucleo fuzzy scoring, best match first
    Fuzzy,
}

impl SearchMode {
    pub fn toggle(self) -> Self {
        match self {
            SearchMode::Substring => SearchMode::Fuzzy,
            SearchMode::Fuzzy => SearchMode::Substring,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Substring => "SUBSTR",
            SearchMode::Fuzzy => "FUZZY",
        }
    }
}

/// Indices into `entries` that match `query`, in display order
///
/// A blank query matches everything in listing order. Queries longer than
/// [`MAX_QUERY_LEN`] characters are cut to that length.
pub fn filter_indices(entries: &[DirEntry], query: &str, mode: SearchMode) -> Vec<usize> {
    let query = truncate_query(query.trim());
    if query.is_empty() {
        return (0..entries.len()).collect();
    }

    match mode {
        SearchMode::Substring => substring_matches(entries, query),
        SearchMode::Fuzzy => fuzzy_matches(entries, query),
    }
}

/// Entries matching `query`, in display order
pub fn filter_entries<'a>(entries: &'a [DirEntry], query: &str, mode: SearchMode) -> Vec<&'a DirEntry> {
    filter_indices(entries, query, mode).into_iter().map(|idx| &entries[idx]).collect()
}

fn truncate_query(query: &str) -> &str {
    match query.char_indices().nth(MAX_QUERY_LEN) {
        Some((end, _)) => &query[..end],
        None => query,
    }
}

fn substring_matches(entries: &[DirEntry], query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.name.to_lowercase().contains(&needle))
        .map(|(idx, _)| idx)
        .collect()
}

fn fuzzy_matches(entries: &[DirEntry], query: &str) -> Vec<usize> {
    let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);
    let mut matcher = Matcher::new(Config::DEFAULT);
    let mut buf = Vec::new();

    let mut scored: Vec<(u32, usize)> = entries
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            pattern.score(Utf32Str::new(&entry.name, &mut buf), &mut matcher).map(|s| (s, idx))
        })
        .collect();

    // Best score first; equal scores keep listing order
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, idx)| idx).collect()
}
