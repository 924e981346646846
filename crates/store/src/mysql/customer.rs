use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use sakila_core::PageParams;
use sakila_domain::{Customer, CustomerPatch, NewCustomer, RentalRecord};

use crate::customer::{CustomerDelete, CustomerStore};
use crate::error::StoreResult;

/// Customer repository over the `customer` table, joined with the
/// address/city/country hierarchy for display fields. Rental history walks
/// `rental -> inventory -> film`.
pub struct MySqlCustomerStore {
    pool: MySqlPool,
}

impl MySqlCustomerStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn customer_from_row(row: &MySqlRow, with_contact: bool) -> Result<Customer, sqlx::Error> {
    let first_name: String = row.try_get("first_name")?;
    let last_name: String = row.try_get("last_name")?;
    let full_name = format!("{first_name} {last_name}");
    Ok(Customer {
        customer_id: row.try_get("customer_id")?,
        store_id: row.try_get("store_id")?,
        first_name,
        last_name,
        full_name,
        email: row.try_get("email")?,
        address_id: row.try_get("address_id")?,
        active: row.try_get("active")?,
        create_date: row.try_get("create_date")?,
        address: row.try_get("address")?,
        city: row.try_get("city")?,
        country: row.try_get("country")?,
        postal_code: if with_contact {
            row.try_get("postal_code")?
        } else {
            None
        },
        phone: if with_contact { row.try_get("phone")? } else { None },
    })
}

const LIST_SELECT: &str = r#"
    SELECT CAST(c.customer_id AS SIGNED) AS customer_id,
           CAST(c.store_id AS SIGNED) AS store_id,
           c.first_name, c.last_name, c.email,
           CAST(c.address_id AS SIGNED) AS address_id,
           c.active, c.create_date,
           a.address, ci.city, co.country
    FROM customer c
    LEFT JOIN address a ON c.address_id = a.address_id
    LEFT JOIN city ci ON a.city_id = ci.city_id
    LEFT JOIN country co ON ci.country_id = co.country_id
"#;

#[async_trait]
impl CustomerStore for MySqlCustomerStore {
    async fn create(&self, customer: NewCustomer) -> StoreResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO customer
                (store_id, first_name, last_name, email, address_id, active, create_date)
            VALUES (?, ?, ?, ?, ?, ?, NOW())
            "#,
        )
        .bind(customer.store_id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(customer.address_id)
        .bind(customer.active)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn read_one(&self, customer_id: i64) -> StoreResult<Option<Customer>> {
        let row = sqlx::query(
            r#"
            SELECT CAST(c.customer_id AS SIGNED) AS customer_id,
                   CAST(c.store_id AS SIGNED) AS store_id,
                   c.first_name, c.last_name, c.email,
                   CAST(c.address_id AS SIGNED) AS address_id,
                   c.active, c.create_date,
                   a.address, a.postal_code, a.phone,
                   ci.city, co.country
            FROM customer c
            LEFT JOIN address a ON c.address_id = a.address_id
            LEFT JOIN city ci ON a.city_id = ci.city_id
            LEFT JOIN country co ON ci.country_id = co.country_id
            WHERE c.customer_id = ?
            LIMIT 1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(|r| customer_from_row(r, true))
            .transpose()
            .map_err(Into::into)
    }

    async fn read_all(&self, page: PageParams) -> StoreResult<Vec<Customer>> {
        let query = format!("{LIST_SELECT} ORDER BY c.last_name, c.first_name LIMIT ? OFFSET ?");
        let rows = sqlx::query(&query)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|r| customer_from_row(r, false))
            .collect::<Result<_, _>>()
            .map_err(Into::into)
    }

    async fn total_count(&self) -> StoreResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM customer")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("total")?)
    }

    async fn search(&self, term: &str) -> StoreResult<Vec<Customer>> {
        let pattern = format!("%{term}%");
        let query = format!(
            r#"{LIST_SELECT}
            WHERE c.first_name LIKE ?
               OR c.last_name LIKE ?
               OR c.email LIKE ?
               OR CONCAT(c.first_name, ' ', c.last_name) LIKE ?
            ORDER BY c.last_name, c.first_name
            "#
        );
        let rows = sqlx::query(&query)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|r| customer_from_row(r, false))
            .collect::<Result<_, _>>()
            .map_err(Into::into)
    }

    async fn update(
        &self,
        customer_id: i64,
        patch: CustomerPatch,
    ) -> StoreResult<Option<Customer>> {
        let Some(mut customer) = self.read_one(customer_id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut customer);

        sqlx::query(
            r#"
            UPDATE customer
            SET store_id = ?, first_name = ?, last_name = ?, email = ?,
                address_id = ?, active = ?
            WHERE customer_id = ?
            "#,
        )
        .bind(customer.store_id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(customer.address_id)
        .bind(customer.active)
        .bind(customer_id)
        .execute(&self.pool)
        .await?;

        Ok(Some(customer))
    }

    async fn delete(&self, customer_id: i64) -> StoreResult<CustomerDelete> {
        let row = sqlx::query("SELECT COUNT(*) AS rental_count FROM rental WHERE customer_id = ?")
            .bind(customer_id)
            .fetch_one(&self.pool)
            .await?;
        let rental_count: i64 = row.try_get("rental_count")?;
        if rental_count > 0 {
            return Ok(CustomerDelete::HasRentals);
        }

        sqlx::query("DELETE FROM customer WHERE customer_id = ?")
            .bind(customer_id)
            .execute(&self.pool)
            .await?;
        Ok(CustomerDelete::Removed)
    }

    async fn rentals(&self, customer_id: i64) -> StoreResult<Vec<RentalRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT CAST(r.rental_id AS SIGNED) AS rental_id,
                   r.rental_date, r.return_date, f.title,
                   CAST(f.rental_rate AS DOUBLE) AS rental_rate,
                   CAST(DATEDIFF(COALESCE(r.return_date, NOW()), r.rental_date) AS SIGNED)
                       AS days_rented
            FROM rental r
            INNER JOIN inventory i ON r.inventory_id = i.inventory_id
            INNER JOIN film f ON i.film_id = f.film_id
            WHERE r.customer_id = ?
            ORDER BY r.rental_date DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(RentalRecord {
                    rental_id: row.try_get("rental_id")?,
                    rental_date: row.try_get("rental_date")?,
                    return_date: row.try_get("return_date")?,
                    title: row.try_get("title")?,
                    rental_rate: row.try_get("rental_rate")?,
                    days_rented: row.try_get("days_rented")?,
                })
            })
            .collect::<Result<_, sqlx::Error>>()
            .map_err(Into::into)
    }

    async fn email_exists(&self, email: &str, excluding_id: i64) -> StoreResult<bool> {
        let row = sqlx::query(
            "SELECT customer_id FROM customer WHERE email = ? AND customer_id != ? LIMIT 1",
        )
        .bind(email)
        .bind(excluding_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }
}
