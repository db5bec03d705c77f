use super::{parse_body, validation_failed, SavedRecipeResponse};
use crate::api::{error_response, ErrorResponse};
use crate::get_conn;
use crate::models::{EncodedLists, NewRecipe};
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
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use rezeptbuch_core::{recipe_id, RecipeInput};

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = RecipeInput,
    responses(
        (status = 200, description = "Recipe created", body = SavedRecipeResponse),
        (status = 400, description = "Invalid JSON body or missing required field", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 409, description = "A recipe with the generated id already exists", body = ErrorResponse),
        (status = 422, description = "Invalid category or subcategory", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
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
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create recipe");
        }
    };

    // One timestamp for both the id suffix and created_at.
    let created_at = Utc::now().timestamp_millis();
    let id = recipe_id(&fields.title, created_at);

    let mut conn = get_conn!(state.pool);

    match diesel::insert_into(recipes::table)
        .values(&NewRecipe::new(&id, &fields, &lists, created_at))
        .execute(&mut conn)
    {
        Ok(_) => {
            tracing::info!(id = %id, category = %fields.category, "Created recipe");
            (StatusCode::OK, Json(SavedRecipeResponse { ok: true, id })).into_response()
        }
        Err(e) => insert_failed(&id, e),
    }
}

/// A primary-key violation means another create produced the same id in
/// the same millisecond.
pub(super) fn insert_failed(id: &str, error: DieselError) -> Response {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            tracing::warn!(id = %id, "Recipe id collision");
            error_response(StatusCode::CONFLICT, "Recipe id already exists")
        }
        e => {
            tracing::error!("Failed to create recipe: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create recipe")
        }
    }
}
