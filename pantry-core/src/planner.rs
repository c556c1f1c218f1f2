//! Meal-plan generation: prompt, model call, repair, validation.

use crate::error::PlanError;
use crate::llm::LlmProvider;
use crate::normalize::normalize;
use crate::prompts::{render_meal_plan_prompt, MEAL_PLAN_PROMPT_NAME};
use crate::types::{MealPlan, RecipePromptParams};
use crate::validate::validate;

/// Render the prompt for `params`, e.g. to paste into an external chat assistant.
pub fn render_prompt(params: &RecipePromptParams) -> String {
    render_meal_plan_prompt(params)
}

/// Generate a meal plan from pantry contents and preferences.
///
/// One model call, no retries. Any failure is returned as-is; callers keep
/// whatever plan they held before.
pub async fn generate_meal_plan(
    provider: &dyn LlmProvider,
    params: &RecipePromptParams,
) -> Result<MealPlan, PlanError> {
    let prompt = render_meal_plan_prompt(params);

    tracing::debug!(
        prompt_name = MEAL_PLAN_PROMPT_NAME,
        provider = provider.provider_name(),
        model = provider.model_name(),
        pantry_items = params.ingredients.len(),
        meals = params.meals,
        "Requesting meal plan"
    );

    let raw = provider.complete(&prompt).await.inspect_err(|e| {
        tracing::warn!(error = %e, "Meal plan request failed");
    })?;

    let plan = parse_meal_plan(&raw)?;

    tracing::info!(
        recipes = plan.recipes.len(),
        shopping_items = plan.shopping_list.len(),
        "Meal plan generated"
    );

    Ok(plan)
}

/// Turn raw model text (from the API or pasted by the user) into a meal plan.
/// Never touches the network.
pub fn parse_meal_plan(raw: &str) -> Result<MealPlan, PlanError> {
    let normalized = normalize(raw);
    Ok(validate(&normalized)?)
}
