use crate::models::{CompState, Match, MatchQuery};

/// Matches picked for a list request
#[derive(Debug)]
pub struct SelectionResult<'a> {
    pub matches: Vec<&'a Match>,
    /// Number of the most recently scored match, independent of any filter
    pub last_scored: Option<u32>,
}

/// Filter `items`, keeping their order, then apply a directional limit
///
/// - `None` keeps everything
/// - a positive limit keeps the first `limit` items
/// - a negative limit keeps the last `|limit|` items
/// - zero keeps nothing
pub fn select<T, P>(items: &[T], predicate: P, limit: Option<i64>) -> Vec<&T>
where
    P: Fn(&T) -> bool,
{
    let mut selected: Vec<&T> = items.iter().filter(|item| predicate(*item)).collect();

    match limit {
        None => {}
        Some(limit) if limit >= 0 => {
            selected.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Some(limit) => {
            let keep = usize::try_from(limit.unsigned_abs()).unwrap_or(usize::MAX);
            let skip = selected.len().saturating_sub(keep);
            selected.drain(..skip);
        }
    }

    selected
}

/// Run a parsed list query against a snapshot
pub fn select_matches<'a>(state: &'a CompState, query: &MatchQuery) -> SelectionResult<'a> {
    let matches = select(&state.matches, |m| query.filters.matches(m), query.limit);

    tracing::debug!(
        "Selected {} of {} matches ({} filters, limit {:?})",
        matches.len(),
        state.matches.len(),
        query.filters.filters().len(),
        query.limit
    );

    SelectionResult {
        matches,
        last_scored: state.last_scored,
    }
}
