use async_trait::async_trait;

use sakila_core::PageParams;
use sakila_domain::{Film, FilmPatch, FilmSummary, NewFilm};

use crate::error::StoreResult;

/// Persistence operations for films.
///
/// `update` follows the read-then-merge pattern: the existing record is
/// loaded, the patch is merged into it inside the repository, and the fully
/// merged record is persisted and returned, so callers never observe a
/// partially-applied state.
#[async_trait]
pub trait FilmStore: Send + Sync {
    /// Insert a new film and return the store-assigned identity.
    async fn create(&self, film: NewFilm) -> StoreResult<i64>;

    /// Fetch one film with its language name, `None` when absent.
    async fn read_one(&self, film_id: i64) -> StoreResult<Option<Film>>;

    /// One page of films ordered by title.
    async fn read_all(&self, page: PageParams) -> StoreResult<Vec<FilmSummary>>;

    async fn total_count(&self) -> StoreResult<i64>;

    /// Case-insensitive substring match on the title, unpaginated,
    /// ordered by title.
    async fn search(&self, term: &str) -> StoreResult<Vec<FilmSummary>>;

    /// Merge `patch` into the stored film and return the merged record,
    /// `None` when the film does not exist.
    async fn update(&self, film_id: i64, patch: FilmPatch) -> StoreResult<Option<Film>>;

    /// Delete a film. A film referenced by inventory or film_actor rows
    /// fails with the store-level constraint error.
    async fn delete(&self, film_id: i64) -> StoreResult<()>;
}
