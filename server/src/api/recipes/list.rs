use crate::api::{error_response, ErrorResponse};
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::recipes;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use diesel::prelude::*;

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes in display order", body = Vec<Recipe>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_recipes(State(state): State<AppState>) -> Response {
    let mut conn = get_conn!(state.pool);

    let mut rows: Vec<Recipe> = match recipes::table.select(Recipe::as_select()).load(&mut conn) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch recipes: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch recipes");
        }
    };

    state.sort_policy.sort(&state.taxonomy, &mut rows);

    (StatusCode::OK, Json(rows)).into_response()
}
