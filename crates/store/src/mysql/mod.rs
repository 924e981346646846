//! MySQL-backed repositories (sqlx) over the Sakila schema.
//!
//! All statements are parameterized; identities come from
//! `last_insert_id()`. DECIMAL columns are cast to DOUBLE in the SELECTs so
//! they decode as `f64`, and the odd-sized unsigned integer columns (YEAR,
//! SMALLINT UNSIGNED) are cast to SIGNED.

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use crate::error::StoreResult;

mod actor;
mod customer;
mod film;

pub use actor::MySqlActorStore;
pub use customer::MySqlCustomerStore;
pub use film::MySqlFilmStore;

/// Open a connection pool against `url` and verify it answers.
pub async fn connect(url: &str) -> StoreResult<MySqlPool> {
    let pool = MySqlPoolOptions::new().connect(url).await.map_err(|err| {
        tracing::error!(error = %err, "failed to open the MySQL pool");
        crate::error::StoreError::from(err)
    })?;
    tracing::info!("MySQL pool ready");
    Ok(pool)
}
