//! Store wiring behind the HTTP layer.

use std::sync::Arc;

use sqlx::MySqlPool;

use sakila_store::mysql::{MySqlActorStore, MySqlCustomerStore, MySqlFilmStore};
use sakila_store::{ActorStore, CustomerStore, FilmStore, MemoryStore};

/// Repository handles shared by every request handler.
pub struct AppServices {
    pub films: Arc<dyn FilmStore>,
    pub actors: Arc<dyn ActorStore>,
    pub customers: Arc<dyn CustomerStore>,
}

impl AppServices {
    /// MySQL-backed stores over one shared pool.
    pub fn mysql(pool: MySqlPool) -> Self {
        Self {
            films: Arc::new(MySqlFilmStore::new(pool.clone())),
            actors: Arc::new(MySqlActorStore::new(pool.clone())),
            customers: Arc::new(MySqlCustomerStore::new(pool)),
        }
    }

    /// In-memory stores for dev/tests. The returned handle lets tests seed
    /// the fixture rows (languages, rentals, film-actor links) the API
    /// itself never writes.
    pub fn in_memory() -> (Self, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let services = Self {
            films: store.clone(),
            actors: store.clone(),
            customers: store.clone(),
        };
        (services, store)
    }
}
