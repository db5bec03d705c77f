pub mod create;
pub mod delete;
pub mod list;
pub mod update;


use crate::api::error_response;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::Query;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use rezeptbuch_core::{RecipeInput, ValidationError};
use serde::Serialize;
use tower_http::set_header::SetResponseHeaderLayer;
use utoipa::{IntoParams, OpenApi, ToSchema};

pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list::list_recipes)
                .post(create::create_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe)
                .fallback(method_not_allowed),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_UTF8),
        ))
}

#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipeIdParams {
    /// Recipe id as returned by create
    pub id: Option<String>,
}

/// Raw query pairs, so a repeated key is not a rejection.
pub type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

impl RecipeIdParams {
    /// First `id` in the query string. Later repeats are ignored.
    pub fn from_pairs(query: QueryPairs) -> Result<Self, Response> {
        let Query(pairs) = query.map_err(|e| {
            tracing::debug!("Rejected query string: {}", e);
            error_response(StatusCode::BAD_REQUEST, "Invalid query string")
        })?;
        let id = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "id").then_some(value));
        Ok(Self { id })
    }

    /// The id, treating an empty value like a missing one.
    pub fn id(self) -> Option<String> {
        self.id.filter(|id| !id.is_empty())
    }
}

/// The id of the recipe a mutation targets, or the 400 to send back.
fn target_id(query: QueryPairs) -> Result<String, Response> {
    RecipeIdParams::from_pairs(query)?.id().ok_or_else(missing_id)
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SavedRecipeResponse {
    pub ok: bool,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeletedRecipeResponse {
    pub ok: bool,
}

fn missing_id() -> Response {
    error_response(StatusCode::BAD_REQUEST, "Missing id")
}

/// Parse a request body without looking at its content type.
fn parse_body(body: Result<Bytes, BytesRejection>) -> Result<RecipeInput, Response> {
    let body = body.map_err(|e| {
        tracing::debug!("Failed to read recipe body: {}", e);
        error_response(e.status(), "Failed to read request body")
    })?;
    RecipeInput::from_json(&body).map_err(|e| {
        tracing::debug!("Rejected recipe body: {}", e);
        error_response(StatusCode::BAD_REQUEST, "Invalid JSON body")
    })
}

async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

fn validation_failed(err: ValidationError) -> Response {
    let status = match err {
        ValidationError::Incomplete(_) => StatusCode::BAD_REQUEST,
        ValidationError::InvalidCategory { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };
    error_response(status, err.to_string())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        crate::models::Recipe,
        rezeptbuch_core::RecipeInput,
        SavedRecipeResponse,
        DeletedRecipeResponse,
    ))
)]
pub struct ApiDoc;
