//! In-memory repositories.
//!
//! Intended for tests/dev: one shared state behind an `RwLock`, implementing
//! all three store traits. Referential integrity is modeled the way the SQL
//! schema enforces it: film/actor deletes fail while `film_actor` or rental
//! rows reference them, customer deletes are refused while rentals exist.
//!
//! Fixture helpers (`add_language`, `link_film_actor`, `add_rental`, ...) let
//! tests build the surrounding schema rows the API itself never writes.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};

use sakila_core::PageParams;
use sakila_domain::{
    Actor, ActorFilm, ActorPatch, Customer, CustomerPatch, Film, FilmPatch, FilmSummary,
    NewActor, NewCustomer, NewFilm, RentalRecord,
};

use crate::actor::ActorStore;
use crate::customer::{CustomerDelete, CustomerStore};
use crate::error::{StoreError, StoreResult};
use crate::film::FilmStore;

#[derive(Debug, Clone)]
struct Rental {
    rental_id: i64,
    customer_id: i64,
    film_id: i64,
    rental_date: NaiveDateTime,
    return_date: Option<NaiveDateTime>,
}

#[derive(Debug)]
struct State {
    films: BTreeMap<i64, Film>,
    actors: BTreeMap<i64, Actor>,
    customers: BTreeMap<i64, Customer>,
    languages: BTreeMap<i64, String>,
    film_actor: Vec<(i64, i64)>,
    rentals: Vec<Rental>,
    next_id: i64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            films: BTreeMap::new(),
            actors: BTreeMap::new(),
            customers: BTreeMap::new(),
            languages: BTreeMap::new(),
            film_actor: Vec::new(),
            rentals: Vec::new(),
            next_id: 1,
        }
    }
}

impl State {
    fn assign_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory store implementing [`FilmStore`], [`ActorStore`] and
/// [`CustomerStore`] over one shared state.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| StoreError::internal("lock poisoned"))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| StoreError::internal("lock poisoned"))
    }

    /// Register a language row and return its id.
    pub fn add_language(&self, name: &str) -> StoreResult<i64> {
        let mut state = self.write()?;
        let id = state.assign_id();
        state.languages.insert(id, name.to_string());
        Ok(id)
    }

    /// Link an actor to a film (a `film_actor` join row).
    pub fn link_film_actor(&self, actor_id: i64, film_id: i64) -> StoreResult<()> {
        let mut state = self.write()?;
        state.film_actor.push((actor_id, film_id));
        Ok(())
    }

    /// Record a rental of `film_id` by `customer_id`.
    pub fn add_rental(
        &self,
        customer_id: i64,
        film_id: i64,
        rental_date: NaiveDateTime,
        return_date: Option<NaiveDateTime>,
    ) -> StoreResult<i64> {
        let mut state = self.write()?;
        let rental_id = state.assign_id();
        state.rentals.push(Rental {
            rental_id,
            customer_id,
            film_id,
            rental_date,
            return_date,
        });
        Ok(rental_id)
    }

    /// Drop every rental row referencing `customer_id`.
    pub fn clear_rentals(&self, customer_id: i64) -> StoreResult<()> {
        let mut state = self.write()?;
        state.rentals.retain(|r| r.customer_id != customer_id);
        Ok(())
    }
}

fn resolve_language(state: &State, film: &Film) -> Film {
    let mut film = film.clone();
    film.language_name = state.languages.get(&film.language_id).cloned();
    film
}

fn summarize(state: &State, film: &Film) -> FilmSummary {
    FilmSummary {
        film_id: film.film_id,
        title: film.title.clone(),
        description: film.description.clone(),
        release_year: film.release_year,
        rental_rate: film.rental_rate,
        length: film.length,
        rating: film.rating.clone(),
        language: state.languages.get(&film.language_id).cloned(),
    }
}

fn page_of<T>(mut items: Vec<T>, page: PageParams) -> Vec<T> {
    let offset = page.offset() as usize;
    if offset >= items.len() {
        return Vec::new();
    }
    items.drain(..offset);
    items.truncate(page.limit as usize);
    items
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl FilmStore for MemoryStore {
    async fn create(&self, film: NewFilm) -> StoreResult<i64> {
        let mut state = self.write()?;
        let film_id = state.assign_id();
        state.films.insert(
            film_id,
            Film {
                film_id,
                title: film.title,
                description: film.description,
                release_year: film.release_year,
                language_id: film.language_id,
                language_name: None,
                rental_duration: film.rental_duration,
                rental_rate: film.rental_rate,
                length: film.length,
                replacement_cost: film.replacement_cost,
                rating: film.rating,
                special_features: film.special_features,
            },
        );
        Ok(film_id)
    }

    async fn read_one(&self, film_id: i64) -> StoreResult<Option<Film>> {
        let state = self.read()?;
        Ok(state.films.get(&film_id).map(|f| resolve_language(&state, f)))
    }

    async fn read_all(&self, page: PageParams) -> StoreResult<Vec<FilmSummary>> {
        let state = self.read()?;
        let mut films: Vec<FilmSummary> =
            state.films.values().map(|f| summarize(&state, f)).collect();
        films.sort_by_key(|f| f.title.to_lowercase());
        Ok(page_of(films, page))
    }

    async fn total_count(&self) -> StoreResult<i64> {
        Ok(self.read()?.films.len() as i64)
    }

    async fn search(&self, term: &str) -> StoreResult<Vec<FilmSummary>> {
        let state = self.read()?;
        let mut films: Vec<FilmSummary> = state
            .films
            .values()
            .filter(|f| contains_ci(&f.title, term))
            .map(|f| summarize(&state, f))
            .collect();
        films.sort_by_key(|f| f.title.to_lowercase());
        Ok(films)
    }

    async fn update(&self, film_id: i64, patch: FilmPatch) -> StoreResult<Option<Film>> {
        let mut state = self.write()?;
        let Some(film) = state.films.get_mut(&film_id) else {
            return Ok(None);
        };
        patch.apply_to(film);
        let film = film.clone();
        Ok(Some(resolve_language(&state, &film)))
    }

    async fn delete(&self, film_id: i64) -> StoreResult<()> {
        let mut state = self.write()?;
        let referenced = state.film_actor.iter().any(|(_, f)| *f == film_id)
            || state.rentals.iter().any(|r| r.film_id == film_id);
        if referenced {
            return Err(StoreError::constraint(format!(
                "film {film_id} is referenced by film_actor or rental rows"
            )));
        }
        state.films.remove(&film_id);
        Ok(())
    }
}

#[async_trait]
impl ActorStore for MemoryStore {
    async fn create(&self, actor: NewActor) -> StoreResult<i64> {
        let mut state = self.write()?;
        let actor_id = state.assign_id();
        state
            .actors
            .insert(actor_id, Actor::new(actor_id, actor.first_name, actor.last_name));
        Ok(actor_id)
    }

    async fn read_one(&self, actor_id: i64) -> StoreResult<Option<Actor>> {
        Ok(self.read()?.actors.get(&actor_id).cloned())
    }

    async fn read_all(&self, page: PageParams) -> StoreResult<Vec<Actor>> {
        let state = self.read()?;
        let mut actors: Vec<Actor> = state.actors.values().cloned().collect();
        actors.sort_by_key(|a| (a.last_name.to_lowercase(), a.first_name.to_lowercase()));
        Ok(page_of(actors, page))
    }

    async fn total_count(&self) -> StoreResult<i64> {
        Ok(self.read()?.actors.len() as i64)
    }

    async fn search(&self, term: &str) -> StoreResult<Vec<Actor>> {
        let state = self.read()?;
        let mut actors: Vec<Actor> = state
            .actors
            .values()
            .filter(|a| {
                contains_ci(&a.first_name, term)
                    || contains_ci(&a.last_name, term)
                    || contains_ci(&a.full_name, term)
            })
            .cloned()
            .collect();
        actors.sort_by_key(|a| (a.last_name.to_lowercase(), a.first_name.to_lowercase()));
        Ok(actors)
    }

    async fn update(&self, actor_id: i64, patch: ActorPatch) -> StoreResult<Option<Actor>> {
        let mut state = self.write()?;
        let Some(actor) = state.actors.get_mut(&actor_id) else {
            return Ok(None);
        };
        patch.apply_to(actor);
        Ok(Some(actor.clone()))
    }

    async fn delete(&self, actor_id: i64) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.film_actor.iter().any(|(a, _)| *a == actor_id) {
            return Err(StoreError::constraint(format!(
                "actor {actor_id} is referenced by film_actor rows"
            )));
        }
        state.actors.remove(&actor_id);
        Ok(())
    }

    async fn films(&self, actor_id: i64) -> StoreResult<Vec<ActorFilm>> {
        let state = self.read()?;
        let mut films: Vec<ActorFilm> = state
            .film_actor
            .iter()
            .filter(|(a, _)| *a == actor_id)
            .filter_map(|(_, film_id)| state.films.get(film_id))
            .map(|f| ActorFilm {
                film_id: f.film_id,
                title: f.title.clone(),
                release_year: f.release_year,
                rating: Some(f.rating.clone()),
            })
            .collect();
        films.sort_by_key(|f| f.title.to_lowercase());
        Ok(films)
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn create(&self, customer: NewCustomer) -> StoreResult<i64> {
        let mut state = self.write()?;
        let customer_id = state.assign_id();
        let full_name = format!("{} {}", customer.first_name, customer.last_name);
        state.customers.insert(
            customer_id,
            Customer {
                customer_id,
                store_id: customer.store_id,
                first_name: customer.first_name,
                last_name: customer.last_name,
                full_name,
                email: customer.email,
                address_id: customer.address_id,
                active: customer.active,
                create_date: Utc::now().naive_utc(),
                address: None,
                city: None,
                country: None,
                postal_code: None,
                phone: None,
            },
        );
        Ok(customer_id)
    }

    async fn read_one(&self, customer_id: i64) -> StoreResult<Option<Customer>> {
        Ok(self.read()?.customers.get(&customer_id).cloned())
    }

    async fn read_all(&self, page: PageParams) -> StoreResult<Vec<Customer>> {
        let state = self.read()?;
        let mut customers: Vec<Customer> = state
            .customers
            .values()
            .cloned()
            .map(|mut c| {
                // List rows carry the address joins but not postal code/phone.
                c.postal_code = None;
                c.phone = None;
                c
            })
            .collect();
        customers.sort_by_key(|c| (c.last_name.to_lowercase(), c.first_name.to_lowercase()));
        Ok(page_of(customers, page))
    }

    async fn total_count(&self) -> StoreResult<i64> {
        Ok(self.read()?.customers.len() as i64)
    }

    async fn search(&self, term: &str) -> StoreResult<Vec<Customer>> {
        let state = self.read()?;
        let mut customers: Vec<Customer> = state
            .customers
            .values()
            .filter(|c| {
                contains_ci(&c.first_name, term)
                    || contains_ci(&c.last_name, term)
                    || contains_ci(&c.full_name, term)
                    || contains_ci(&c.email, term)
            })
            .cloned()
            .collect();
        customers.sort_by_key(|c| (c.last_name.to_lowercase(), c.first_name.to_lowercase()));
        Ok(customers)
    }

    async fn update(
        &self,
        customer_id: i64,
        patch: CustomerPatch,
    ) -> StoreResult<Option<Customer>> {
        let mut state = self.write()?;
        let Some(customer) = state.customers.get_mut(&customer_id) else {
            return Ok(None);
        };
        patch.apply_to(customer);
        Ok(Some(customer.clone()))
    }

    async fn delete(&self, customer_id: i64) -> StoreResult<CustomerDelete> {
        let mut state = self.write()?;
        if state.rentals.iter().any(|r| r.customer_id == customer_id) {
            return Ok(CustomerDelete::HasRentals);
        }
        state.customers.remove(&customer_id);
        Ok(CustomerDelete::Removed)
    }

    async fn rentals(&self, customer_id: i64) -> StoreResult<Vec<RentalRecord>> {
        let state = self.read()?;
        let now = Utc::now().naive_utc();
        let mut records: Vec<RentalRecord> = state
            .rentals
            .iter()
            .filter(|r| r.customer_id == customer_id)
            .filter_map(|r| {
                let film = state.films.get(&r.film_id)?;
                Some(RentalRecord {
                    rental_id: r.rental_id,
                    rental_date: r.rental_date,
                    return_date: r.return_date,
                    title: film.title.clone(),
                    rental_rate: film.rental_rate,
                    // Calendar-date difference, as DATEDIFF computes it.
                    days_rented: (r.return_date.unwrap_or(now).date() - r.rental_date.date())
                        .num_days(),
                })
            })
            .collect();
        records.sort_by_key(|r| std::cmp::Reverse(r.rental_date));
        Ok(records)
    }

    async fn email_exists(&self, email: &str, excluding_id: i64) -> StoreResult<bool> {
        let state = self.read()?;
        Ok(state
            .customers
            .values()
            .any(|c| c.email == email && c.customer_id != excluding_id))
    }
}
