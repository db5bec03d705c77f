use super::{target_id, DeletedRecipeResponse, QueryPairs, RecipeIdParams};
use crate::api::{error_response, ErrorResponse};
use crate::get_conn;
use crate::schema::recipes;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    response::Response,
    Json,
};
use diesel::prelude::*;

/// Hard delete. Deleting an id that does not exist answers 200 as well.
#[utoipa::path(
    delete,
    path = "/api/recipes",
    tag = "recipes",
    params(RecipeIdParams),
    responses(
        (status = 200, description = "Recipe deleted (also when no recipe has this id)", body = DeletedRecipeResponse),
        (status = 400, description = "Missing id", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    query: QueryPairs,
) -> Response {
    let id = match target_id(query) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let mut conn = get_conn!(state.pool);

    match diesel::delete(recipes::table.filter(recipes::id.eq(&id))).execute(&mut conn) {
        Ok(count) => {
            tracing::info!(id = %id, deleted = count, "Deleted recipe");
            (StatusCode::OK, Json(DeletedRecipeResponse { ok: true })).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to delete recipe: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete recipe")
        }
    }
}
