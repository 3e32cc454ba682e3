//! Timeline ordering and the fixed biographical events.
//!
//! Both the timeline store and the presentation merge sort with [`sort_by_year`], so a
//! given set of events always comes out in the same order: ascending by integer year,
//! ties in insertion order.

use crate::error::AppError;
use crate::models::{EventSource, TimelineEntry, TimelineEvent};

/// Anything that sits on the timeline at a given year.
pub trait Dated {
    fn year(&self) -> &str;
}

impl Dated for TimelineEvent {
    fn year(&self) -> &str {
        &self.year
    }
}

impl Dated for TimelineEntry {
    fn year(&self) -> &str {
        &self.year
    }
}

/// Sort key for a year string. Integer years order numerically; anything else sorts last.
pub fn year_sort_key(year: &str) -> (u8, i64) {
    match year.trim().parse::<i64>() {
        Ok(value) => (0, value),
        Err(_) => (1, 0),
    }
}

/// Stable ascending sort by integer year.
pub fn sort_by_year<T: Dated>(items: &mut [T]) {
    items.sort_by_key(|item| year_sort_key(item.year()));
}

/// Reject years that would not order numerically.
pub fn validate_year(year: &str) -> Result<(), AppError> {
    year.trim().parse::<i64>().map(|_| ()).map_err(|_| {
        AppError::InvalidInput(format!("Year must be an integer, got '{}'", year))
    })
}

/// A hard-coded biographical event shown on every timeline.
#[derive(Debug, Clone, Copy)]
pub struct DefaultEvent {
    pub year: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const DEFAULT_EVENTS: &[DefaultEvent] = &[
    DefaultEvent {
        year: "2006",
        title: "Bienvenue au monde !",
        description: "Le début d'une belle aventure",
    },
    DefaultEvent {
        year: "2012",
        title: "Première rentrée scolaire",
        description: "Le début de l'apprentissage",
    },
    DefaultEvent {
        year: "2018",
        title: "Entrée au collège",
        description: "Nouveaux défis, nouvelles amitiés",
    },
    DefaultEvent {
        year: "2021",
        title: "Années lycée",
        description: "Grandir et se découvrir",
    },
    DefaultEvent {
        year: "2024",
        title: "18 ans - Majorité !",
        description: "Une nouvelle étape commence",
    },
];

impl From<&DefaultEvent> for TimelineEntry {
    fn from(event: &DefaultEvent) -> Self {
        Self {
            id: format!("default-{}", event.year),
            year: event.year.to_string(),
            title: event.title.to_string(),
            description: event.description.to_string(),
            photo_url: None,
            photo_id: None,
            created_at: None,
            source: EventSource::Default,
        }
    }
}

/// Concatenate the defaults with the uploaded events and sort the union by year.
///
/// Defaults come first in the concatenation, so an upload sharing a year with a default
/// event is listed after it.
pub fn merge_with_defaults(
    defaults: &[DefaultEvent],
    uploads: Vec<TimelineEvent>,
) -> Vec<TimelineEntry> {
    let mut entries: Vec<TimelineEntry> = defaults
        .iter()
        .map(TimelineEntry::from)
        .chain(uploads.into_iter().map(TimelineEntry::from))
        .collect();
    sort_by_year(&mut entries);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event(year: &str, title: &str) -> TimelineEvent {
        TimelineEvent {
            id: title.to_string(),
            year: year.to_string(),
            title: title.to_string(),
            description: String::new(),
            photo_url: None,
            photo_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn sorts_numerically_not_lexically() {
        let mut events = vec![event("2020", "a"), event("999", "b"), event("2010", "c")];
        sort_by_year(&mut events);
        let years: Vec<_> = events.iter().map(|e| e.year.as_str()).collect();
        assert_eq!(years, vec!["999", "2010", "2020"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut events = vec![
            event("2015", "first"),
            event("2001", "early"),
            event("2015", "second"),
            event(" 2015 ", "third"),
        ];
        sort_by_year(&mut events);
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["early", "first", "second", "third"]);
    }

    #[test]
    fn non_numeric_years_sort_last() {
        let mut events = vec![event("someday", "x"), event("2030", "y"), event("1990", "z")];
        sort_by_year(&mut events);
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["z", "y", "x"]);
    }

    #[test]
    fn validate_year_accepts_integers_only() {
        assert!(validate_year("2015").is_ok());
        assert!(validate_year(" 1999 ").is_ok());
        assert!(matches!(validate_year("MMXV"), Err(AppError::InvalidInput(_))));
        assert!(validate_year("2015abc").is_err());
        assert!(validate_year("").is_err());
    }

    #[test]
    fn merge_places_uploads_between_defaults() {
        let merged = merge_with_defaults(DEFAULT_EVENTS, vec![event("2015", "Beach")]);
        let years: Vec<_> = merged.iter().map(|e| e.year.as_str()).collect();
        assert_eq!(years, vec!["2006", "2012", "2015", "2018", "2021", "2024"]);
        assert_eq!(merged[2].source, EventSource::Upload);
        assert_eq!(merged[2].title, "Beach");
        assert!(merged
            .iter()
            .filter(|e| e.source == EventSource::Default)
            .all(|e| e.created_at.is_none()));
    }

    #[test]
    fn merge_lists_default_before_upload_of_same_year() {
        let merged = merge_with_defaults(DEFAULT_EVENTS, vec![event("2018", "Same year")]);
        let idx_default = merged.iter().position(|e| e.id == "default-2018").unwrap();
        let idx_upload = merged.iter().position(|e| e.title == "Same year").unwrap();
        assert!(idx_default < idx_upload);
    }
}
