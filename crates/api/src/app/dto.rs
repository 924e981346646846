//! Request DTOs and their mapping into domain values.
//!
//! Create/update bodies deserialize with every field optional so that a
//! missing required field produces a validation message naming the field
//! rather than a serde error. The `into_*` conversions sanitize each string,
//! enforce the per-entity rules, and hand back typed domain values.

use serde::Deserialize;

use sakila_core::{sanitize, validate, DomainError, DomainResult, PageParams};
use sakila_domain::{ActorPatch, CustomerPatch, FilmPatch, NewActor, NewCustomer, NewFilm};

/// Query parameters recognized by every list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams::new(self.page, self.limit)
    }

    /// The sanitized search term; an absent or blank term means list mode.
    pub fn search_term(&self) -> Option<String> {
        let term = sanitize::clean(self.search.as_deref()?);
        (!term.is_empty()).then_some(term)
    }
}

fn required_number(field: &str, value: Option<i64>) -> DomainResult<i64> {
    value.ok_or_else(|| DomainError::validation(format!("The field '{field}' is required")))
}

// -------------------------
// Films
// -------------------------

#[derive(Debug, Deserialize)]
pub struct FilmBody {
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

impl FilmBody {
    pub fn into_new_film(self) -> DomainResult<NewFilm> {
        let title = validate::required("title", self.title.as_deref())?;
        let language_id = required_number("language_id", self.language_id)?;

        let mut film = NewFilm::new(title, language_id)?;
        film.description = self.description.as_deref().map(sanitize::clean);
        film.release_year = self.release_year;
        film.length = self.length;
        film.special_features = self.special_features.as_deref().map(sanitize::clean);
        if let Some(v) = self.rental_duration {
            film.rental_duration = v;
        }
        if let Some(v) = self.rental_rate {
            film.rental_rate = v;
        }
        if let Some(v) = self.replacement_cost {
            film.replacement_cost = v;
        }
        if let Some(rating) = self.rating.as_deref() {
            film.rating = sanitize::clean(rating);
        }
        Ok(film)
    }

    pub fn into_patch(self) -> DomainResult<FilmPatch> {
        let title = match self.title.as_deref() {
            Some(raw) => {
                let title = sanitize::clean(raw);
                validate::non_blank("title", &title)?;
                Some(title)
            }
            None => None,
        };
        Ok(FilmPatch {
            title,
            description: self.description.as_deref().map(sanitize::clean),
            release_year: self.release_year,
            language_id: self.language_id,
            rental_duration: self.rental_duration,
            rental_rate: self.rental_rate,
            length: self.length,
            replacement_cost: self.replacement_cost,
            rating: self.rating.as_deref().map(sanitize::clean),
            special_features: self.special_features.as_deref().map(sanitize::clean),
        })
    }
}

// -------------------------
// Actors
// -------------------------

#[derive(Debug, Deserialize)]
pub struct ActorBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ActorBody {
    pub fn into_new_actor(self) -> DomainResult<NewActor> {
        let first_name = validate::required("first_name", self.first_name.as_deref())?;
        let last_name = validate::required("last_name", self.last_name.as_deref())?;
        NewActor::new(first_name, last_name)
    }

    pub fn into_patch(self) -> DomainResult<ActorPatch> {
        Ok(ActorPatch {
            first_name: clean_name("first_name", self.first_name.as_deref())?,
            last_name: clean_name("last_name", self.last_name.as_deref())?,
        })
    }
}

fn clean_name(field: &str, value: Option<&str>) -> DomainResult<Option<String>> {
    match value {
        Some(raw) => {
            let name = sanitize::clean(raw);
            validate::non_blank(field, &name)?;
            Ok(Some(name))
        }
        None => Ok(None),
    }
}

// -------------------------
// Customers
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CustomerBody {
    pub store_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub address_id: Option<i64>,
    pub active: Option<bool>,
}

impl CustomerBody {
    pub fn into_new_customer(self) -> DomainResult<NewCustomer> {
        let store_id = required_number("store_id", self.store_id)?;
        let first_name = validate::required("first_name", self.first_name.as_deref())?;
        let last_name = validate::required("last_name", self.last_name.as_deref())?;
        let email = validate::required("email", self.email.as_deref())?;
        let address_id = required_number("address_id", self.address_id)?;

        NewCustomer::new(
            store_id,
            first_name,
            last_name,
            email,
            address_id,
            self.active,
        )
    }

    pub fn into_patch(self) -> DomainResult<CustomerPatch> {
        let email = match self.email.as_deref() {
            Some(raw) => {
                let email = sanitize::clean(raw);
                validate::email(&email)?;
                Some(email)
            }
            None => None,
        };
        Ok(CustomerPatch {
            store_id: self.store_id,
            first_name: clean_name("first_name", self.first_name.as_deref())?,
            last_name: clean_name("last_name", self.last_name.as_deref())?,
            email,
            address_id: self.address_id,
            active: self.active,
        })
    }
}
