//! Entity records for the media-rental catalog (films, actors, customers).
//!
//! This crate contains the typed records the repositories read and write:
//! fully-populated read models, `New*` values whose constructors enforce the
//! required fields, and `*Patch` values carrying a partial update. No IO, no
//! HTTP, no storage.

pub mod actor;
pub mod customer;
pub mod film;

pub use actor::{Actor, ActorFilm, ActorPatch, NewActor};
pub use customer::{Customer, CustomerPatch, NewCustomer, RentalRecord};
pub use film::{Film, FilmPatch, FilmSummary, NewFilm};
