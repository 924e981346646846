use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::app::dto::{FilmBody, ListQuery};
use crate::app::errors::{respond, ApiError};
use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(index).post(store))
        .route("/:id", get(show).put(update).delete(destroy))
}

async fn index(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::validation("Invalid query parameters"))?;

    if let Some(term) = query.search_term() {
        let films = services.films.search(&term).await?;
        return Ok(respond(
            StatusCode::OK,
            format!("Search results for: {term}"),
            Some(json!({ "films": films })),
        ));
    }

    let params = query.page_params();
    let films = services.films.read_all(params).await?;
    let total = services.films.total_count().await?;
    Ok(respond(
        StatusCode::OK,
        "Films retrieved successfully",
        Some(json!({ "films": films, "pagination": params.meta(total) })),
    ))
}

async fn show(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id("film", &id)?;
    let film = services
        .films
        .read_one(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Film not found"))?;
    Ok(respond(
        StatusCode::OK,
        "Film found",
        Some(json!(film)),
    ))
}

async fn store(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<FilmBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let film = body.into_new_film()?;
    let id = services.films.create(film).await?;
    Ok(respond(
        StatusCode::CREATED,
        "Film created successfully",
        Some(json!({ "film_id": id })),
    ))
}

async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<FilmBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id("film", &id)?;
    let Json(body) = body?;
    let patch = body.into_patch()?;
    let film = services
        .films
        .update(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Film not found"))?;
    Ok(respond(
        StatusCode::OK,
        "Film updated successfully",
        Some(json!(film)),
    ))
}

async fn destroy(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id("film", &id)?;
    services
        .films
        .read_one(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Film not found"))?;
    services.films.delete(id).await.map_err(|err| {
        ApiError::storage(format!(
            "Failed to delete the film; it may be referenced in other tables ({err})"
        ))
    })?;
    Ok(respond(StatusCode::OK, "Film deleted successfully", None))
}
