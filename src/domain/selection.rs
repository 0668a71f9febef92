use std::collections::HashMap;

use crate::config::MatchFilter;
use crate::domain::models::Match;

/// Keeps ranked matches of the configured country, newest first
pub fn select_matches(matches: HashMap<String, Match>, filter: &MatchFilter) -> Vec<Match> {
    let mut selected: Vec<Match> = matches
        .into_values()
        .filter(|m| m.country_code == filter.country_code)
        .filter(|m| m.level >= filter.min_level)
        .collect();

    selected.sort_by(|a, b| {
        b.start_date
            .cmp(&a.start_date)
            .then_with(|| a.id.cmp(&b.id))
    });
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::MatchDate;

    fn event(id: &str, country: &str, level: i32, start: MatchDate) -> (String, Match) {
        let m = Match {
            id: id.to_string(),
            title: format!("Match {}", id),
            country_code: country.to_string(),
            level,
            start_date: start,
            end_date: start,
            stages: Vec::new(),
        };
        (id.to_string(), m)
    }

    #[test]
    fn test_filters_country_and_level_and_sorts_newest_first() {
        let matches: HashMap<String, Match> = [
            event("old", "IL", 1, MatchDate::new(2023, 5, 1)),
            event("new", "IL", 3, MatchDate::new(2024, 1, 10)),
            event("club", "IL", 0, MatchDate::new(2024, 2, 1)),
            event("abroad", "CZ", 4, MatchDate::new(2024, 3, 1)),
            event("mid", "IL", 2, MatchDate::new(2023, 11, 20)),
        ]
        .into_iter()
        .collect();

        let selected = select_matches(matches, &MatchFilter::default());
        let ids: Vec<&str> = selected.iter().map(|m| m.id.as_str()).collect();

        assert_eq!(ids, vec!["new", "mid", "old"]);
    }
}
