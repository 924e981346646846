//! Customer records, based on the `customer` table of the Sakila schema.
//!
//! The read model carries the display fields joined from the address, city
//! and country tables; list rows omit `postal_code`/`phone`, which only the
//! fetch-one query selects.

use chrono::NaiveDateTime;
use serde::Serialize;

use sakila_core::{sanitize, validate, DomainResult};

/// A customer, enriched with the address hierarchy display joins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub customer_id: i64,
    pub store_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub address_id: i64,
    pub active: bool,
    pub create_date: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Customer {
    /// Recompute the derived `full_name` after a name change.
    pub fn refresh_full_name(&mut self) {
        self.full_name = format!("{} {}", self.first_name, self.last_name);
    }
}

/// A customer ready to be inserted. Names must be non-blank and the email
/// syntactically valid; `active` defaults to true and `create_date` is
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub store_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address_id: i64,
    pub active: bool,
}

impl NewCustomer {
    pub fn new(
        store_id: i64,
        first_name: &str,
        last_name: &str,
        email: &str,
        address_id: i64,
        active: Option<bool>,
    ) -> DomainResult<Self> {
        let first_name = sanitize::clean(first_name);
        let last_name = sanitize::clean(last_name);
        let email = sanitize::clean(email);
        validate::non_blank("first_name", &first_name)?;
        validate::non_blank("last_name", &last_name)?;
        validate::email(&email)?;
        Ok(Self {
            store_id,
            first_name,
            last_name,
            email,
            address_id,
            active: active.unwrap_or(true),
        })
    }
}

/// Partial update for a customer. Identity and `create_date` are never
/// touched by a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub store_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub address_id: Option<i64>,
    pub active: Option<bool>,
}

impl CustomerPatch {
    /// Merge this patch into a freshly loaded record.
    pub fn apply_to(self, customer: &mut Customer) {
        if let Some(v) = self.store_id {
            customer.store_id = v;
        }
        if let Some(v) = self.first_name {
            customer.first_name = v;
        }
        if let Some(v) = self.last_name {
            customer.last_name = v;
        }
        if let Some(v) = self.email {
            customer.email = v;
        }
        if let Some(v) = self.address_id {
            customer.address_id = v;
        }
        if let Some(v) = self.active {
            customer.active = v;
        }
        customer.refresh_full_name();
    }
}

/// One row of a customer's rental history. `days_rented` is the day span
/// between the rental date and the return date, or the current time while
/// the rental is still open.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalRecord {
    pub rental_id: i64,
    pub rental_date: NaiveDateTime,
    pub return_date: Option<NaiveDateTime>,
    pub title: String,
    pub rental_rate: f64,
    pub days_rented: i64,
}
