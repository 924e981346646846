use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::app::dto::{ActorBody, ListQuery};
use crate::app::errors::{respond, ApiError};
use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(index).post(store))
        .route("/:id", get(show).put(update).delete(destroy))
        .route("/:id/films", get(filmography))
}

async fn index(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::validation("Invalid query parameters"))?;

    if let Some(term) = query.search_term() {
        let actors = services.actors.search(&term).await?;
        return Ok(respond(
            StatusCode::OK,
            format!("Search results for: {term}"),
            Some(json!({ "actors": actors })),
        ));
    }

    let params = query.page_params();
    let actors = services.actors.read_all(params).await?;
    let total = services.actors.total_count().await?;
    Ok(respond(
        StatusCode::OK,
        "Actors retrieved successfully",
        Some(json!({ "actors": actors, "pagination": params.meta(total) })),
    ))
}

async fn show(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id("actor", &id)?;
    let actor = services
        .actors
        .read_one(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Actor not found"))?;
    Ok(respond(StatusCode::OK, "Actor found", Some(json!(actor))))
}

/// Films the actor appears in, ordered by title.
async fn filmography(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id("actor", &id)?;
    services
        .actors
        .read_one(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Actor not found"))?;
    let films = services.actors.films(id).await?;
    Ok(respond(
        StatusCode::OK,
        "Actor films retrieved successfully",
        Some(json!(films)),
    ))
}

async fn store(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<ActorBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let actor = body.into_new_actor()?;
    let id = services.actors.create(actor).await?;
    Ok(respond(
        StatusCode::CREATED,
        "Actor created successfully",
        Some(json!({ "actor_id": id })),
    ))
}

async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<ActorBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id("actor", &id)?;
    let Json(body) = body?;
    let patch = body.into_patch()?;
    let actor = services
        .actors
        .update(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Actor not found"))?;
    Ok(respond(
        StatusCode::OK,
        "Actor updated successfully",
        Some(json!(actor)),
    ))
}

async fn destroy(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id("actor", &id)?;
    services
        .actors
        .read_one(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Actor not found"))?;
    services.actors.delete(id).await.map_err(|err| {
        ApiError::storage(format!(
            "Failed to delete the actor; it may be referenced in other tables ({err})"
        ))
    })?;
    Ok(respond(StatusCode::OK, "Actor deleted successfully", None))
}
