use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use sakila_core::PageParams;
use sakila_domain::{Actor, ActorFilm, ActorPatch, NewActor};

use crate::actor::ActorStore;
use crate::error::StoreResult;

/// Actor repository over the `actor` table; the filmography query walks the
/// `film_actor` join entity.
pub struct MySqlActorStore {
    pool: MySqlPool,
}

impl MySqlActorStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn actor_from_row(row: &MySqlRow) -> Result<Actor, sqlx::Error> {
    Ok(Actor::new(
        row.try_get("actor_id")?,
        row.try_get("first_name")?,
        row.try_get("last_name")?,
    ))
}

#[async_trait]
impl ActorStore for MySqlActorStore {
    async fn create(&self, actor: NewActor) -> StoreResult<i64> {
        let result = sqlx::query("INSERT INTO actor (first_name, last_name) VALUES (?, ?)")
            .bind(&actor.first_name)
            .bind(&actor.last_name)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn read_one(&self, actor_id: i64) -> StoreResult<Option<Actor>> {
        let row = sqlx::query(
            r#"
            SELECT CAST(actor_id AS SIGNED) AS actor_id, first_name, last_name
            FROM actor
            WHERE actor_id = ?
            LIMIT 1
            "#,
        )
        .bind(actor_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(actor_from_row).transpose().map_err(Into::into)
    }

    async fn read_all(&self, page: PageParams) -> StoreResult<Vec<Actor>> {
        let rows = sqlx::query(
            r#"
            SELECT CAST(actor_id AS SIGNED) AS actor_id, first_name, last_name
            FROM actor
            ORDER BY last_name, first_name
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(actor_from_row)
            .collect::<Result<_, _>>()
            .map_err(Into::into)
    }

    async fn total_count(&self) -> StoreResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM actor")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("total")?)
    }

    async fn search(&self, term: &str) -> StoreResult<Vec<Actor>> {
        let pattern = format!("%{term}%");
        let rows = sqlx::query(
            r#"
            SELECT CAST(actor_id AS SIGNED) AS actor_id, first_name, last_name
            FROM actor
            WHERE first_name LIKE ?
               OR last_name LIKE ?
               OR CONCAT(first_name, ' ', last_name) LIKE ?
            ORDER BY last_name, first_name
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(actor_from_row)
            .collect::<Result<_, _>>()
            .map_err(Into::into)
    }

    async fn update(&self, actor_id: i64, patch: ActorPatch) -> StoreResult<Option<Actor>> {
        let Some(mut actor) = self.read_one(actor_id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut actor);

        sqlx::query("UPDATE actor SET first_name = ?, last_name = ? WHERE actor_id = ?")
            .bind(&actor.first_name)
            .bind(&actor.last_name)
            .bind(actor_id)
            .execute(&self.pool)
            .await?;

        Ok(Some(actor))
    }

    async fn delete(&self, actor_id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM actor WHERE actor_id = ?")
            .bind(actor_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn films(&self, actor_id: i64) -> StoreResult<Vec<ActorFilm>> {
        let rows = sqlx::query(
            r#"
            SELECT CAST(f.film_id AS SIGNED) AS film_id,
                   f.title,
                   CAST(f.release_year AS SIGNED) AS release_year,
                   f.rating
            FROM film f
            INNER JOIN film_actor fa ON f.film_id = fa.film_id
            WHERE fa.actor_id = ?
            ORDER BY f.title
            "#,
        )
        .bind(actor_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(ActorFilm {
                    film_id: row.try_get("film_id")?,
                    title: row.try_get("title")?,
                    release_year: row
                        .try_get::<Option<i64>, _>("release_year")?
                        .map(|y| y as i32),
                    rating: row.try_get("rating")?,
                })
            })
            .collect::<Result<_, sqlx::Error>>()
            .map_err(Into::into)
    }
}
