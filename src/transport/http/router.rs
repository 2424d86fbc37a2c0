use crate::domain::plant::Plant;
use crate::error::ErrorResponse;
use crate::transport::http::handlers::{health, plants};
use crate::transport::http::types::{
    AppState, CreatePlantRequest, HealthResponse, UpdatePlantRequest,
};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        plants::list_plants_handler,
        plants::create_plant_handler,
        plants::get_plant_handler,
        plants::update_plant_handler,
        plants::delete_plant_handler
    ),
    components(schemas(
        Plant,
        CreatePlantRequest,
        UpdatePlantRequest,
        ErrorResponse,
        HealthResponse
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/plants",
            get(plants::list_plants_handler).post(plants::create_plant_handler),
        )
        .route(
            "/plants/:id",
            get(plants::get_plant_handler)
                .patch(plants::update_plant_handler)
                .delete(plants::delete_plant_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
