use async_trait::async_trait;

use sakila_core::PageParams;
use sakila_domain::{Customer, CustomerPatch, NewCustomer, RentalRecord};

use crate::error::StoreResult;

/// Outcome of a customer delete.
///
/// The dependent-rental refusal is a value, not an error: the business rule
/// fired, nothing went wrong in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerDelete {
    Removed,
    HasRentals,
}

/// Persistence operations for customers.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert a new customer (create_date assigned by the store) and return
    /// the store-assigned identity.
    async fn create(&self, customer: NewCustomer) -> StoreResult<i64>;

    /// Fetch one customer with the address/city/country display joins,
    /// including postal code and phone.
    async fn read_one(&self, customer_id: i64) -> StoreResult<Option<Customer>>;

    /// One page of customers ordered by last name, then first name.
    async fn read_all(&self, page: PageParams) -> StoreResult<Vec<Customer>>;

    async fn total_count(&self) -> StoreResult<i64>;

    /// Case-insensitive substring match across names, full name and email.
    async fn search(&self, term: &str) -> StoreResult<Vec<Customer>>;

    /// Merge `patch` into the stored customer and return the merged record,
    /// `None` when the customer does not exist. `create_date` never changes.
    async fn update(
        &self,
        customer_id: i64,
        patch: CustomerPatch,
    ) -> StoreResult<Option<Customer>>;

    /// Delete a customer, refusing while dependent rental rows exist.
    async fn delete(&self, customer_id: i64) -> StoreResult<CustomerDelete>;

    /// The customer's rental history, newest first.
    async fn rentals(&self, customer_id: i64) -> StoreResult<Vec<RentalRecord>>;

    /// Whether `email` is used by any customer other than `excluding_id`.
    /// At create time callers pass 0, which matches no row.
    async fn email_exists(&self, email: &str, excluding_id: i64) -> StoreResult<bool>;
}
