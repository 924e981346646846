use async_trait::async_trait;

use sakila_core::PageParams;
use sakila_domain::{Actor, ActorFilm, ActorPatch, NewActor};

use crate::error::StoreResult;

/// Persistence operations for actors.
#[async_trait]
pub trait ActorStore: Send + Sync {
    /// Insert a new actor and return the store-assigned identity.
    async fn create(&self, actor: NewActor) -> StoreResult<i64>;

    async fn read_one(&self, actor_id: i64) -> StoreResult<Option<Actor>>;

    /// One page of actors ordered by last name, then first name.
    async fn read_all(&self, page: PageParams) -> StoreResult<Vec<Actor>>;

    async fn total_count(&self) -> StoreResult<i64>;

    /// Case-insensitive substring match across first, last and full name.
    async fn search(&self, term: &str) -> StoreResult<Vec<Actor>>;

    /// Merge `patch` into the stored actor and return the merged record,
    /// `None` when the actor does not exist.
    async fn update(&self, actor_id: i64, patch: ActorPatch) -> StoreResult<Option<Actor>>;

    /// Delete an actor. An actor still linked to films fails with the
    /// store-level constraint error.
    async fn delete(&self, actor_id: i64) -> StoreResult<()>;

    /// The actor's filmography, ordered by title.
    async fn films(&self, actor_id: i64) -> StoreResult<Vec<ActorFilm>>;
}
