//! Repositories for the media-rental entities.
//!
//! One trait per entity owns every persistence operation for that entity.
//! Two implementations exist side by side: a MySQL-backed store (sqlx) for
//! production, and an in-memory store for tests/dev.

pub mod actor;
pub mod customer;
pub mod error;
pub mod film;
pub mod memory;
pub mod mysql;

pub use actor::ActorStore;
pub use customer::{CustomerDelete, CustomerStore};
pub use error::{StoreError, StoreResult};
pub use film::FilmStore;
pub use memory::MemoryStore;
