//! Pantry-driven meal planning: the contract between free-form model output
//! and a typed [`MealPlan`].
//!
//! ```text
//! params -> sanitize -> prompt -> LlmProvider -> normalize -> validate -> MealPlan
//!                          pasted text ----------^
//! ```

pub mod error;
pub mod llm;
pub mod messages;
pub mod normalize;
pub mod planner;
pub mod prompts;
pub mod sanitize;
pub mod types;
pub mod validate;

pub use error::{ErrorKind, PlanError};
pub use llm::{
    create_provider, create_provider_from_env, FakeProvider, GeminiConfig, GeminiProvider,
    LlmError, LlmProvider,
};
pub use messages::ErrorMessages;
pub use normalize::normalize;
pub use planner::{generate_meal_plan, parse_meal_plan, render_prompt};
pub use prompts::render_meal_plan_prompt;
pub use sanitize::{sanitize, sanitize_with_limit};
pub use types::{Ingredient, MealPlan, Nutrition, PantryItem, Recipe, RecipePromptParams};
pub use validate::{validate, ValidationError};
