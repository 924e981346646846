use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use sakila_store::CustomerDelete;

use crate::app::dto::{CustomerBody, ListQuery};
use crate::app::errors::{respond, ApiError};
use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(index).post(store))
        .route("/:id", get(show).put(update).delete(destroy))
        .route("/:id/rentals", get(rentals))
}

async fn index(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::validation("Invalid query parameters"))?;

    if let Some(term) = query.search_term() {
        let customers = services.customers.search(&term).await?;
        return Ok(respond(
            StatusCode::OK,
            format!("Search results for: {term}"),
            Some(json!({ "customers": customers })),
        ));
    }

    let params = query.page_params();
    let customers = services.customers.read_all(params).await?;
    let total = services.customers.total_count().await?;
    Ok(respond(
        StatusCode::OK,
        "Customers retrieved successfully",
        Some(json!({ "customers": customers, "pagination": params.meta(total) })),
    ))
}

async fn show(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id("customer", &id)?;
    let customer = services
        .customers
        .read_one(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer not found"))?;
    Ok(respond(
        StatusCode::OK,
        "Customer found",
        Some(json!(customer)),
    ))
}

/// Rental history, newest first, with the days each film was kept out.
async fn rentals(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id("customer", &id)?;
    services
        .customers
        .read_one(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer not found"))?;
    let rentals = services.customers.rentals(id).await?;
    Ok(respond(
        StatusCode::OK,
        "Rental history retrieved successfully",
        Some(json!(rentals)),
    ))
}

async fn store(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<CustomerBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let customer = body.into_new_customer()?;
    if services.customers.email_exists(&customer.email, 0).await? {
        return Err(ApiError::conflict("The email is already in use"));
    }
    let id = services.customers.create(customer).await?;
    Ok(respond(
        StatusCode::CREATED,
        "Customer created successfully",
        Some(json!({ "customer_id": id })),
    ))
}

async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<CustomerBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id("customer", &id)?;
    let Json(body) = body?;
    let patch = body.into_patch()?;
    if let Some(email) = patch.email.as_deref() {
        if services.customers.email_exists(email, id).await? {
            return Err(ApiError::conflict(
                "The email is already in use by another customer",
            ));
        }
    }
    let customer = services
        .customers
        .update(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer not found"))?;
    Ok(respond(
        StatusCode::OK,
        "Customer updated successfully",
        Some(json!(customer)),
    ))
}

async fn destroy(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id("customer", &id)?;
    services
        .customers
        .read_one(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer not found"))?;
    match services.customers.delete(id).await? {
        CustomerDelete::Removed => Ok(respond(
            StatusCode::OK,
            "Customer deleted successfully",
            None,
        )),
        CustomerDelete::HasRentals => Err(ApiError::integrity(
            "Cannot delete customer because it has associated rentals",
        )),
    }
}
