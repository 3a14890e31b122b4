use super::AuthorStat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Count,
    Span,
}

impl From<&str> for SortOrder {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "span" => SortOrder::Span,
            _ => SortOrder::Count,
        }
    }
}

/// Sorts ascending by the selected key. Stable, so ties keep input order.
pub fn sort_stats(stats: &mut [AuthorStat], order: SortOrder) {
    match order {
        SortOrder::Count => stats.sort_by_key(|s| s.commit_count),
        SortOrder::Span => stats.sort_by_key(|s| s.span),
    }
}
