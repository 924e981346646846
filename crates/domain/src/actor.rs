//! Actor records, based on the `actor` table of the Sakila schema.

use serde::Serialize;

use sakila_core::{sanitize, validate, DomainResult};

/// An actor, with the derived `full_name` populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub actor_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl Actor {
    pub fn new(actor_id: i64, first_name: String, last_name: String) -> Self {
        let full_name = format!("{first_name} {last_name}");
        Self {
            actor_id,
            first_name,
            last_name,
            full_name,
        }
    }
}

/// An actor ready to be inserted. Both names are required and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActor {
    pub first_name: String,
    pub last_name: String,
}

impl NewActor {
    pub fn new(first_name: &str, last_name: &str) -> DomainResult<Self> {
        let first_name = sanitize::clean(first_name);
        let last_name = sanitize::clean(last_name);
        validate::non_blank("first_name", &first_name)?;
        validate::non_blank("last_name", &last_name)?;
        Ok(Self {
            first_name,
            last_name,
        })
    }
}

/// Partial update for an actor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ActorPatch {
    /// Merge this patch into a freshly loaded record, recomputing `full_name`.
    pub fn apply_to(self, actor: &mut Actor) {
        if let Some(v) = self.first_name {
            actor.first_name = v;
        }
        if let Some(v) = self.last_name {
            actor.last_name = v;
        }
        actor.full_name = format!("{} {}", actor.first_name, actor.last_name);
    }
}

/// One row of an actor's filmography.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorFilm {
    pub film_id: i64,
    pub title: String,
    pub release_year: Option<i32>,
    pub rating: Option<String>,
}
