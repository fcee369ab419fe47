//! Decoding stream payloads into recipes.

use serde::Deserialize;
use thiserror::Error;

use crate::order::Recipe;

/// Why a payload was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Payload is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Payload has no meal field")]
    MissingMeal,

    #[error("Payload meal is blank")]
    BlankMeal,
}

impl PayloadError {
    /// Short reason label (for metrics).
    pub fn reason(&self) -> &'static str {
        match self {
            PayloadError::InvalidJson(_) => "invalid_json",
            PayloadError::MissingMeal => "missing_meal",
            PayloadError::BlankMeal => "blank_meal",
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecipe {
    meal: Option<String>,
    #[serde(default)]
    steps: Vec<String>,
}

/// Decode one SSE `data` payload.
///
/// `meal` is required and must not be blank. `steps` may be omitted.
pub fn decode_recipe(data: &str) -> Result<Recipe, PayloadError> {
    let raw: RawRecipe =
        serde_json::from_str(data).map_err(|e| PayloadError::InvalidJson(e.to_string()))?;

    let meal = raw.meal.ok_or(PayloadError::MissingMeal)?;
    if meal.trim().is_empty() {
        return Err(PayloadError::BlankMeal);
    }

    Ok(Recipe {
        meal,
        steps: raw.steps,
    })
}
