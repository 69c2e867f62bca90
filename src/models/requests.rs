use crate::core::filters::{FilterError, MatchFilterSet};

/// Query key carrying the directional limit
pub const LIMIT: &str = "limit";

/// Parsed query of a match list request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchQuery {
    pub filters: MatchFilterSet,
    /// Positive: earliest first. Negative: latest first.
    pub limit: Option<i64>,
}

impl MatchQuery {
    /// Parse raw, possibly repeated, query parameters
    ///
    /// Everything is validated up front; a query that fails here never
    /// produces a partial result.
    pub fn from_params<'a, I>(params: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let (limits, filters): (Vec<_>, Vec<_>) =
            params.into_iter().partition(|(key, _)| *key == LIMIT);

        let filters = MatchFilterSet::build(filters)?;

        let limit = match limits.first() {
            Some((_, raw)) => Some(
                raw.parse::<i64>()
                    .map_err(|_| FilterError::InvalidLimit(raw.to_string()))?,
            ),
            None => None,
        };

        Ok(Self { filters, limit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_not_a_filter() {
        let query = MatchQuery::from_params([("arena", "A"), ("limit", "-1")]).unwrap();
        assert_eq!(query.limit, Some(-1));
        assert_eq!(query.filters.filters().len(), 1);
    }

    #[test]
    fn test_no_params() {
        assert_eq!(MatchQuery::from_params([]).unwrap(), MatchQuery::default());
    }

    #[test]
    fn test_bad_limit() {
        assert_eq!(
            MatchQuery::from_params([("limit", "ten")]).unwrap_err(),
            FilterError::InvalidLimit("ten".to_string())
        );
    }

    #[test]
    fn test_unknown_filter_reported_before_bad_limit() {
        assert_eq!(
            MatchQuery::from_params([("limit", "ten"), ("bees", "1")]).unwrap_err(),
            FilterError::UnknownFilter("bees".to_string())
        );
    }
}
