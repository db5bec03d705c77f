use crate::error::ValidationError;
use crate::taxonomy::Taxonomy;
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Recipe body as sent by clients on create and update.
///
/// Fields are kept as raw JSON values because clients send numbers for text
/// fields and strings for `servings`. [`RecipeInput::validate`] does the
/// coercion.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RecipeInput {
    #[schema(value_type = String)]
    pub title: Value,
    #[schema(value_type = String)]
    pub category: Value,
    #[schema(value_type = Option<String>)]
    pub subcategory: Value,
    /// Anything that is not a positive integer is stored as 1.
    #[schema(value_type = Option<i64>)]
    pub servings: Value,
    #[schema(value_type = String, example = "15 min")]
    pub prep: Value,
    #[schema(value_type = String, example = "45 min")]
    pub total: Value,
    #[schema(value_type = Vec<String>)]
    pub ingredients: Value,
    #[schema(value_type = Vec<String>)]
    pub steps: Value,
}

/// Normalized, validated recipe content: everything except `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFields {
    pub title: String,
    pub category: String,
    pub subcategory: String,
    pub servings: i64,
    pub prep: String,
    pub total: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl RecipeInput {
    /// Parse a request body. The body must be a JSON object; a key that
    /// appears more than once keeps its last value.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let object: Map<String, Value> = serde_json::from_slice(body)?;
        serde_json::from_value(Value::Object(object))
    }

    /// Trim and coerce every field without rejecting anything.
    pub fn normalize(&self) -> RecipeFields {
        RecipeFields {
            title: text(&self.title),
            category: text(&self.category),
            subcategory: text(&self.subcategory),
            servings: servings(&self.servings),
            prep: text(&self.prep),
            total: text(&self.total),
            ingredients: text_list(&self.ingredients),
            steps: text_list(&self.steps),
        }
    }

    pub fn validate(&self, taxonomy: &Taxonomy) -> Result<RecipeFields, ValidationError> {
        let fields = self.normalize();
        fields.check_complete()?;
        fields.check_taxonomy(taxonomy)?;
        Ok(fields)
    }
}

impl RecipeFields {
    pub fn check_complete(&self) -> Result<(), ValidationError> {
        let required = [
            ("title", self.title.is_empty()),
            ("category", self.category.is_empty()),
            ("prep", self.prep.is_empty()),
            ("total", self.total.is_empty()),
            ("ingredients", self.ingredients.is_empty()),
            ("steps", self.steps.is_empty()),
        ];
        match required.into_iter().find(|(_, missing)| *missing) {
            Some((field, _)) => Err(ValidationError::Incomplete(field)),
            None => Ok(()),
        }
    }

    pub fn check_taxonomy(&self, taxonomy: &Taxonomy) -> Result<(), ValidationError> {
        if taxonomy.accepts(&self.category, &self.subcategory) {
            Ok(())
        } else {
            Err(ValidationError::InvalidCategory {
                category: self.category.clone(),
                subcategory: self.subcategory.clone(),
            })
        }
    }
}

/// Scalars become their text form; null, arrays and objects become empty.
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn text_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(text)
            .filter(|item| !item.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn servings(value: &Value) -> i64 {
    leading_integer(&text(value))
        .filter(|n| *n >= 1)
        .unwrap_or(1)
}

/// Integer prefix of `s`: optional sign, then digits up to the first
/// non-digit. Overlong digit runs saturate.
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = rest.get(..end).filter(|d| !d.is_empty())?;
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
