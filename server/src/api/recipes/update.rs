use super::{
    parse_body, target_id, validation_failed, QueryPairs, RecipeIdParams, SavedRecipeResponse,
};
use crate::api::{error_response, ErrorResponse};
use crate::get_conn;
use crate::models::{EncodedLists, RecipeChanges};
use crate::schema::recipes;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::IntoResponse,
    response::Response,
    Json,
};
use diesel::prelude::*;
use rezeptbuch_core::RecipeInput;

/// Replace every field of a recipe except `id` and `created_at`.
///
/// The body must be a complete recipe; nothing is merged from the stored
/// row. An id that matches no row still answers 200.
#[utoipa::path(
    put,
    path = "/api/recipes",
    tag = "recipes",
    params(RecipeIdParams),
    request_body = RecipeInput,
    responses(
        (status = 200, description = "Recipe updated (also when no recipe has this id)", body = SavedRecipeResponse),
        (status = 400, description = "Missing id, invalid JSON body or missing required field", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 422, description = "Invalid category or subcategory", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    query: QueryPairs,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let id = match target_id(query) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let input = match parse_body(body) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let fields = match input.validate(&state.taxonomy) {
        Ok(fields) => fields,
        Err(e) => return validation_failed(e),
    };

    let lists = match EncodedLists::encode(&fields) {
        Ok(lists) => lists,
        Err(e) => {
            tracing::error!("Failed to encode recipe lists: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update recipe");
        }
    };

    let mut conn = get_conn!(state.pool);

    match diesel::update(recipes::table.filter(recipes::id.eq(&id)))
        .set(&RecipeChanges::new(&fields, &lists))
        .execute(&mut conn)
    {
        Ok(0) => {
            tracing::debug!(id = %id, "Update matched no recipe");
            (StatusCode::OK, Json(SavedRecipeResponse { ok: true, id })).into_response()
        }
        Ok(_) => {
            tracing::info!(id = %id, "Updated recipe");
            (StatusCode::OK, Json(SavedRecipeResponse { ok: true, id })).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to update recipe: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update recipe")
        }
    }
}
