use axum::http::StatusCode;
use axum::response::Response;
use serde_json::json;

use crate::app::errors::respond;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// API info document served at the root.
pub async fn info() -> Response {
    let info = json!({
        "api_name": "Sakila REST API",
        "version": "1.0.0",
        "description": "REST API over the Sakila rental database",
        "endpoints": {
            "films": {
                "GET /films": "list films (page, limit) or search (search)",
                "GET /films/{id}": "fetch one film",
                "POST /films": "create a film",
                "PUT /films/{id}": "partially update a film",
                "DELETE /films/{id}": "delete a film"
            },
            "actors": {
                "GET /actors": "list actors (page, limit) or search (search)",
                "GET /actors/{id}": "fetch one actor",
                "GET /actors/{id}/films": "the actor's filmography",
                "POST /actors": "create an actor",
                "PUT /actors/{id}": "partially update an actor",
                "DELETE /actors/{id}": "delete an actor"
            },
            "customers": {
                "GET /customers": "list customers (page, limit) or search (search)",
                "GET /customers/{id}": "fetch one customer",
                "GET /customers/{id}/rentals": "the customer's rental history",
                "POST /customers": "create a customer",
                "PUT /customers/{id}": "partially update a customer",
                "DELETE /customers/{id}": "delete a customer"
            }
        },
        "query_parameters": {
            "page": "page number (default: 1)",
            "limit": "items per page (default: 10, max: 100)",
            "search": "case-insensitive substring search term"
        }
    });
    respond(StatusCode::OK, "Sakila REST API information", Some(info))
}
