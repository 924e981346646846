use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use sakila_core::PageParams;
use sakila_domain::{Film, FilmPatch, FilmSummary, NewFilm};

use crate::error::StoreResult;
use crate::film::FilmStore;

/// Film repository over the `film` table, joined with `language` for the
/// display name.
pub struct MySqlFilmStore {
    pool: MySqlPool,
}

impl MySqlFilmStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const SUMMARY_SELECT: &str = r#"
    SELECT CAST(f.film_id AS SIGNED) AS film_id,
           f.title,
           f.description,
           CAST(f.release_year AS SIGNED) AS release_year,
           CAST(f.rental_rate AS DOUBLE) AS rental_rate,
           CAST(f.length AS SIGNED) AS length,
           f.rating,
           l.name AS language
    FROM film f
    LEFT JOIN language l ON f.language_id = l.language_id
"#;

fn summary_from_row(row: &MySqlRow) -> Result<FilmSummary, sqlx::Error> {
    Ok(FilmSummary {
        film_id: row.try_get("film_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        release_year: row
            .try_get::<Option<i64>, _>("release_year")?
            .map(|y| y as i32),
        rental_rate: row.try_get("rental_rate")?,
        length: row.try_get::<Option<i64>, _>("length")?.map(|l| l as i32),
        rating: row
            .try_get::<Option<String>, _>("rating")?
            .unwrap_or_else(|| "G".to_string()),
        language: row.try_get("language")?,
    })
}

fn film_from_row(row: &MySqlRow) -> Result<Film, sqlx::Error> {
    Ok(Film {
        film_id: row.try_get("film_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        release_year: row
            .try_get::<Option<i64>, _>("release_year")?
            .map(|y| y as i32),
        language_id: row.try_get("language_id")?,
        language_name: row.try_get("language_name")?,
        rental_duration: row.try_get::<i64, _>("rental_duration")? as i32,
        rental_rate: row.try_get("rental_rate")?,
        length: row.try_get::<Option<i64>, _>("length")?.map(|l| l as i32),
        replacement_cost: row.try_get("replacement_cost")?,
        rating: row
            .try_get::<Option<String>, _>("rating")?
            .unwrap_or_else(|| "G".to_string()),
        special_features: row.try_get("special_features")?,
    })
}

#[async_trait]
impl FilmStore for MySqlFilmStore {
    async fn create(&self, film: NewFilm) -> StoreResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO film
                (title, description, release_year, language_id, rental_duration,
                 rental_rate, length, replacement_cost, rating, special_features)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&film.title)
        .bind(&film.description)
        .bind(film.release_year)
        .bind(film.language_id)
        .bind(film.rental_duration)
        .bind(film.rental_rate)
        .bind(film.length)
        .bind(film.replacement_cost)
        .bind(&film.rating)
        .bind(&film.special_features)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn read_one(&self, film_id: i64) -> StoreResult<Option<Film>> {
        let row = sqlx::query(
            r#"
            SELECT CAST(f.film_id AS SIGNED) AS film_id,
                   f.title,
                   f.description,
                   CAST(f.release_year AS SIGNED) AS release_year,
                   CAST(f.language_id AS SIGNED) AS language_id,
                   l.name AS language_name,
                   CAST(f.rental_duration AS SIGNED) AS rental_duration,
                   CAST(f.rental_rate AS DOUBLE) AS rental_rate,
                   CAST(f.length AS SIGNED) AS length,
                   CAST(f.replacement_cost AS DOUBLE) AS replacement_cost,
                   f.rating,
                   f.special_features
            FROM film f
            LEFT JOIN language l ON f.language_id = l.language_id
            WHERE f.film_id = ?
            LIMIT 1
            "#,
        )
        .bind(film_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(film_from_row).transpose().map_err(Into::into)
    }

    async fn read_all(&self, page: PageParams) -> StoreResult<Vec<FilmSummary>> {
        let query = format!("{SUMMARY_SELECT} ORDER BY f.title LIMIT ? OFFSET ?");
        let rows = sqlx::query(&query)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(summary_from_row)
            .collect::<Result<_, _>>()
            .map_err(Into::into)
    }

    async fn total_count(&self) -> StoreResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM film")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("total")?)
    }

    async fn search(&self, term: &str) -> StoreResult<Vec<FilmSummary>> {
        let query = format!("{SUMMARY_SELECT} WHERE f.title LIKE ? ORDER BY f.title");
        let rows = sqlx::query(&query)
            .bind(format!("%{term}%"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(summary_from_row)
            .collect::<Result<_, _>>()
            .map_err(Into::into)
    }

    async fn update(&self, film_id: i64, patch: FilmPatch) -> StoreResult<Option<Film>> {
        let Some(mut film) = self.read_one(film_id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut film);

        sqlx::query(
            r#"
            UPDATE film
            SET title = ?, description = ?, release_year = ?, language_id = ?,
                rental_duration = ?, rental_rate = ?, length = ?,
                replacement_cost = ?, rating = ?, special_features = ?
            WHERE film_id = ?
            "#,
        )
        .bind(&film.title)
        .bind(&film.description)
        .bind(film.release_year)
        .bind(film.language_id)
        .bind(film.rental_duration)
        .bind(film.rental_rate)
        .bind(film.length)
        .bind(film.replacement_cost)
        .bind(&film.rating)
        .bind(&film.special_features)
        .bind(film_id)
        .execute(&self.pool)
        .await?;

        Ok(Some(film))
    }

    async fn delete(&self, film_id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM film WHERE film_id = ?")
            .bind(film_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
