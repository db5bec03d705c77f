use diesel::prelude::*;
use rezeptbuch_core::{encode_list, CodecError, RecipeFields, Sortable};
use serde::Serialize;
use utoipa::ToSchema;

/// A stored recipe, serialized exactly as the row is laid out.
///
/// Only `id` is guaranteed. Rows written by this server fill every column,
/// but the table itself allows NULL and older rows may carry it.
#[derive(Queryable, Selectable, Serialize, Debug, Clone, ToSchema)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Recipe {
    pub id: String,
    pub title: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub servings: Option<i64>,
    pub prep: Option<String>,
    pub total: Option<String>,
    /// JSON-encoded array of strings
    pub ingredients_json: Option<String>,
    /// JSON-encoded array of strings
    pub steps_json: Option<String>,
    /// Milliseconds since the Unix epoch
    pub created_at: Option<i64>,
}

// Missing values sort like empty text and the epoch.
impl Sortable for Recipe {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    fn category(&self) -> &str {
        self.category.as_deref().unwrap_or_default()
    }

    fn subcategory(&self) -> &str {
        self.subcategory.as_deref().unwrap_or_default()
    }

    fn created_at(&self) -> i64 {
        self.created_at.unwrap_or_default()
    }
}

/// Ingredient and step lists in their stored form.
#[derive(Debug, Clone)]
pub struct EncodedLists {
    pub ingredients_json: String,
    pub steps_json: String,
}

impl EncodedLists {
    pub fn encode(fields: &RecipeFields) -> Result<Self, CodecError> {
        Ok(Self {
            ingredients_json: encode_list(&fields.ingredients)?,
            steps_json: encode_list(&fields.steps)?,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub category: &'a str,
    pub subcategory: &'a str,
    pub servings: i64,
    pub prep: &'a str,
    pub total: &'a str,
    pub ingredients_json: &'a str,
    pub steps_json: &'a str,
    pub created_at: i64,
}

impl<'a> NewRecipe<'a> {
    pub fn new(
        id: &'a str,
        fields: &'a RecipeFields,
        lists: &'a EncodedLists,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            title: &fields.title,
            category: &fields.category,
            subcategory: &fields.subcategory,
            servings: fields.servings,
            prep: &fields.prep,
            total: &fields.total,
            ingredients_json: &lists.ingredients_json,
            steps_json: &lists.steps_json,
            created_at,
        }
    }
}

/// Every mutable column. `id` and `created_at` are never part of an update.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeChanges<'a> {
    pub title: &'a str,
    pub category: &'a str,
    pub subcategory: &'a str,
    pub servings: i64,
    pub prep: &'a str,
    pub total: &'a str,
    pub ingredients_json: &'a str,
    pub steps_json: &'a str,
}

impl<'a> RecipeChanges<'a> {
    pub fn new(fields: &'a RecipeFields, lists: &'a EncodedLists) -> Self {
        Self {
            title: &fields.title,
            category: &fields.category,
            subcategory: &fields.subcategory,
            servings: fields.servings,
            prep: &fields.prep,
            total: &fields.total,
            ingredients_json: &lists.ingredients_json,
            steps_json: &lists.steps_json,
        }
    }
}
