//! Film records, based on the `film` table of the Sakila schema.

use serde::Serialize;

use sakila_core::{sanitize, validate, DomainResult};

/// A fully-populated film, enriched with the language name join.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Film {
    pub film_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub language_id: i64,
    pub language_name: Option<String>,
    pub rental_duration: i32,
    pub rental_rate: f64,
    pub length: Option<i32>,
    pub replacement_cost: f64,
    pub rating: String,
    pub special_features: Option<String>,
}

/// Trimmed projection used by list and search responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmSummary {
    pub film_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub rental_rate: f64,
    pub length: Option<i32>,
    pub rating: String,
    pub language: Option<String>,
}

/// A film ready to be inserted. Construction enforces the required fields
/// and fills in the schema defaults; the optional fields are set afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFilm {
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub language_id: i64,
    pub rental_duration: i32,
    pub rental_rate: f64,
    pub length: Option<i32>,
    pub replacement_cost: f64,
    pub rating: String,
    pub special_features: Option<String>,
}

impl NewFilm {
    pub fn new(title: &str, language_id: i64) -> DomainResult<Self> {
        let title = sanitize::clean(title);
        validate::non_blank("title", &title)?;
        Ok(Self {
            title,
            description: None,
            release_year: None,
            language_id,
            rental_duration: 3,
            rental_rate: 4.99,
            length: None,
            replacement_cost: 19.99,
            rating: "G".to_string(),
            special_features: None,
        })
    }
}

/// Partial update for a film. Only the submitted fields change; the identity
/// is never touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilmPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub language_id: Option<i64>,
    pub rental_duration: Option<i32>,
    pub rental_rate: Option<f64>,
    pub length: Option<i32>,
    pub replacement_cost: Option<f64>,
    pub rating: Option<String>,
    pub special_features: Option<String>,
}

impl FilmPatch {
    /// Merge this patch into a freshly loaded record.
    pub fn apply_to(self, film: &mut Film) {
        if let Some(v) = self.title {
            film.title = v;
        }
        if let Some(v) = self.description {
            film.description = Some(v);
        }
        if let Some(v) = self.release_year {
            film.release_year = Some(v);
        }
        if let Some(v) = self.language_id {
            film.language_id = v;
        }
        if let Some(v) = self.rental_duration {
            film.rental_duration = v;
        }
        if let Some(v) = self.rental_rate {
            film.rental_rate = v;
        }
        if let Some(v) = self.length {
            film.length = Some(v);
        }
        if let Some(v) = self.replacement_cost {
            film.replacement_cost = v;
        }
        if let Some(v) = self.rating {
            film.rating = v;
        }
        if let Some(v) = self.special_features {
            film.special_features = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Film {
        Film {
            film_id: 7,
            title: "Alien".to_string(),
            description: Some("In space".to_string()),
            release_year: Some(1979),
            language_id: 1,
            language_name: Some("English".to_string()),
            rental_duration: 3,
            rental_rate: 4.99,
            length: Some(117),
            replacement_cost: 19.99,
            rating: "R".to_string(),
            special_features: None,
        }
    }

    #[test]
    fn new_film_applies_schema_defaults() {
        let film = NewFilm::new("Test Movie", 1).unwrap();
        assert_eq!(film.rental_duration, 3);
        assert_eq!(film.rental_rate, 4.99);
        assert_eq!(film.replacement_cost, 19.99);
        assert_eq!(film.rating, "G");
        assert!(film.description.is_none());
    }

    #[test]
    fn new_film_rejects_blank_title() {
        assert!(NewFilm::new("   ", 1).is_err());
        assert!(NewFilm::new("<b></b>", 1).is_err());
    }

    #[test]
    fn new_film_sanitizes_the_title() {
        let film = NewFilm::new("  <i>Alien</i>  ", 1).unwrap();
        assert_eq!(film.title, "Alien");
    }

    #[test]
    fn patch_changes_only_submitted_fields() {
        let mut film = sample();
        FilmPatch {
            rental_rate: Some(2.99),
            ..Default::default()
        }
        .apply_to(&mut film);

        assert_eq!(film.rental_rate, 2.99);
        assert_eq!(film.title, "Alien");
        assert_eq!(film.rating, "R");
        assert_eq!(film.film_id, 7);
    }

    #[test]
    fn empty_patch_is_a_noop() {
        let mut film = sample();
        let patch = FilmPatch::default();
        patch.apply_to(&mut film);
        assert_eq!(film, sample());
    }
}
