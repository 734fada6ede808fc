//! Default fuzzy filter used by handlers that do not override
//! [`Handler::filter`](crate::Handler::filter).

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Keep the items whose key fuzzily matches `query`, best matches first.
///
/// Matching is case-insensitive. Items with equal scores keep their input
/// order. A blank query returns `items` unchanged.
pub fn fuzzy_filter<T, F>(query: &str, items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items;
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, T)> = items
        .into_iter()
        .filter_map(|item| {
            let text = key(&item).to_lowercase();
            matcher.fuzzy_match(&text, &query).map(|score| (score, item))
        })
        .collect();

    // sort_by is stable, so ties stay in fetch order
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["smile", "smiley_cat", "rocket", "tada", "SMIRK"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn blank_query_is_pass_through() {
        assert_eq!(fuzzy_filter("", names(), Clone::clone), names());
        assert_eq!(fuzzy_filter("   ", names(), Clone::clone), names());
    }

    #[test]
    fn drops_non_matches() {
        let hits = fuzzy_filter("rock", names(), Clone::clone);
        assert_eq!(hits, vec!["rocket"]);
    }

    #[test]
    fn matching_ignores_case() {
        let hits = fuzzy_filter("smirk", names(), Clone::clone);
        assert_eq!(hits, vec!["SMIRK"]);
    }

    #[test]
    fn best_match_comes_first() {
        let hits = fuzzy_filter("smile", names(), Clone::clone);
        assert_eq!(hits.first().map(String::as_str), Some("smile"));
        assert!(hits.contains(&"smiley_cat".to_string()));
        assert!(!hits.contains(&"tada".to_string()));
    }

    #[test]
    fn no_matches_yields_empty() {
        assert!(fuzzy_filter("zzzz", names(), Clone::clone).is_empty());
    }
}
