use crate::domain::plant::Plant;
use crate::error::{CatalogResult, ErrorResponse};
use crate::transport::http::handlers::common::{json_body, plant_id};
use crate::transport::http::types::{AppState, CreatePlantRequest, UpdatePlantRequest};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/plants",
    responses(
        (status = 200, description = "All plants in insertion order", body = [Plant]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_plants_handler(State(state): State<AppState>) -> CatalogResult<Json<Vec<Plant>>> {
    Ok(Json(state.catalog.list_plants().await?))
}

#[utoipa::path(
    post,
    path = "/plants",
    request_body = CreatePlantRequest,
    responses(
        (status = 201, description = "Plant created", body = Plant),
        (status = 400, description = "Missing fields, invalid price or malformed body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_plant_handler(
    State(state): State<AppState>,
    request: Result<Json<CreatePlantRequest>, JsonRejection>,
) -> CatalogResult<(StatusCode, Json<Plant>)> {
    let request = json_body(request, "{\"name\", \"image\", \"price\", \"is_in_stock\"?}")?;
    let new_plant = request.validate()?;
    let plant = state.catalog.create_plant(new_plant).await?;
    Ok((StatusCode::CREATED, Json(plant)))
}

#[utoipa::path(
    get,
    path = "/plants/{id}",
    params(
        ("id" = i64, Path, description = "Plant id")
    ),
    responses(
        (status = 200, description = "Plant found", body = Plant),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_plant_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> CatalogResult<Json<Plant>> {
    let id = plant_id(id)?;
    Ok(Json(state.catalog.get_plant(id).await?))
}

#[utoipa::path(
    patch,
    path = "/plants/{id}",
    params(
        ("id" = i64, Path, description = "Plant id")
    ),
    request_body = UpdatePlantRequest,
    responses(
        (status = 200, description = "Plant updated", body = Plant),
        (status = 400, description = "No valid data provided", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_plant_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<UpdatePlantRequest>, JsonRejection>,
) -> CatalogResult<Json<Plant>> {
    let id = plant_id(id)?;
    // Existence is checked before the body so an unknown id is always a 404.
    state.catalog.get_plant(id).await?;

    let is_in_stock = json_body(request, "{\"is_in_stock\": bool}")?.validate()?;
    Ok(Json(state.catalog.set_in_stock(id, is_in_stock).await?))
}

#[utoipa::path(
    delete,
    path = "/plants/{id}",
    params(
        ("id" = i64, Path, description = "Plant id")
    ),
    responses(
        (status = 204, description = "Plant deleted"),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_plant_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> CatalogResult<StatusCode> {
    let id = plant_id(id)?;
    state.catalog.delete_plant(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
