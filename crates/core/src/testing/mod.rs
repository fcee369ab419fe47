//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use kitchen_core::testing::{fixtures, MockRecipeStream};
//!
//! let stream = MockRecipeStream::new();
//! let subscription = stream.subscribe(handler).await;
//!
//! stream.push_recipe(&fixtures::panini()).await;
//! stream.push("{not json").await;
//! stream.fail(StreamError::Disconnected).await;
//! ```

mod mock_recipe_stream;

pub use mock_recipe_stream::MockRecipeStream;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::order::Recipe;

    /// Build a recipe from string slices.
    pub fn recipe(meal: &str, steps: &[&str]) -> Recipe {
        Recipe::new(meal, steps.iter().map(|s| s.to_string()).collect())
    }

    pub fn panini() -> Recipe {
        recipe("Panini", &["Toast bread", "Add filling"])
    }

    pub fn ramen() -> Recipe {
        recipe("Ramen", &["Boil broth", "Cook noodles", "Assemble bowl"])
    }

    /// JSON payload as the stream would deliver it.
    pub fn payload(recipe: &Recipe) -> String {
        serde_json::json!({ "meal": recipe.meal, "steps": recipe.steps }).to_string()
    }
}
