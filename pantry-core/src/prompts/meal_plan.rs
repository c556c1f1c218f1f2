//! Meal-plan prompt: turns pantry contents and preferences into the full
//! instruction set sent to the model.

use crate::sanitize::sanitize;
use crate::types::RecipePromptParams;

/// Prompt name, used in logs.
pub const MEAL_PLAN_PROMPT_NAME: &str = "meal_plan";

/// Generation rules, embedded verbatim in every prompt.
pub const GENERATION_RULES: &str = r#"RULES:
1. Strictly follow the given DIET. Never use an ingredient that violates it, not even if it is in the pantry.
2. Prioritize the available pantry ingredients and reuse them across recipes where it makes sense. List the IDs of the pantry items a recipe uses in its "usedIngredients" array.
3. Keep portions realistic for the given number of people and scale all amounts accordingly.
4. Make the recipes varied: use different main components, cuisines and cooking methods.
5. Balance flavors and textures: combine sour, sweet, salty and savory notes and pair something crunchy with something soft.
6. Where it fits, suggest a matching sauce or dip and include its ingredients and steps in the recipe.
7. If there are too few pantry items for the requested number of recipes, add common ingredients as needed and treat them as missing ingredients.
8. Compute "missingIngredients" separately for each recipe: it lists only the ingredients that this recipe needs and that are neither in the pantry nor among the available spices. Never combine missing ingredients of several recipes into one recipe.
9. "shoppingList" aggregates the missing ingredients of all recipes: list every item once and add up the amounts of identical items.
10. Always keep "item" and "amount" as separate fields. Never put the amount into the item name (correct: {"item": "onion", "amount": "2"}, wrong: {"item": "2 onions"}).
11. Never use unescaped double quotes inside JSON string values. Use single quotes instead (write 'paella', not "paella").
12. Write every text value (titles, ingredient names, instructions, comments) in the requested OUTPUT LANGUAGE.
13. Respond ONLY with valid JSON in exactly the following format, without markdown and without any text before or after it:"#;

/// Schema example shown to the model.
pub const SCHEMA_EXAMPLE: &str = r#"{
  "recipes": [
    {
      "id": "recipe-1",
      "title": "Recipe title",
      "time": "30 min",
      "ingredients": [
        {"item": "onion", "amount": "2", "unit": "pcs"},
        {"item": "olive oil", "amount": "2", "unit": "tbsp"}
      ],
      "instructions": ["First step.", "Second step."],
      "usedIngredients": ["pantry-id-1"],
      "missingIngredients": [
        {"item": "olive oil", "amount": "2", "unit": "tbsp"}
      ],
      "nutrition": {"calories": 450, "carbs": 40, "fat": 15, "protein": 30},
      "comments": "Optional tip, variation or serving suggestion."
    }
  ],
  "shoppingList": [
    {"item": "olive oil", "amount": "2", "unit": "tbsp"}
  ]
}
The "comments" field is optional."#;

/// Instruction used instead of the pantry listing when the pantry is empty.
pub const EMPTY_PANTRY_INSTRUCTION: &str =
    "The pantry is empty. Choose suitable ingredients yourself and list all of them as missing ingredients.";

/// Render the complete meal-plan prompt.
///
/// Every user-supplied text field goes through [`sanitize`] first. Pantry IDs
/// are system-generated and are kept as-is so the model can echo them back.
/// The output depends only on `params`.
pub fn render_meal_plan_prompt(params: &RecipePromptParams) -> String {
    let diet = sanitize(&params.diet);
    let language = sanitize(&params.language);

    let pantry_section = if params.ingredients.is_empty() {
        EMPTY_PANTRY_INSTRUCTION.to_string()
    } else {
        let lines = params
            .ingredients
            .iter()
            .map(|item| {
                format!(
                    "- {} ({}) [ID: {}]",
                    sanitize(&item.name),
                    sanitize(&item.amount),
                    item.id
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("AVAILABLE INGREDIENTS (pantry):\n{lines}")
    };

    let spices: Vec<String> = params
        .spices
        .iter()
        .map(|s| sanitize(s))
        .filter(|s| !s.is_empty())
        .collect();
    let spice_section = if spices.is_empty() {
        String::new()
    } else {
        format!(
            "\n\nAVAILABLE SPICES: {}\nThese spices are already at home: they must NOT appear in the shopping list or in any \"missingIngredients\", but whenever a recipe uses one of them it MUST appear in that recipe's \"ingredients\" array.",
            spices.join(", ")
        )
    };

    let wishes: Vec<String> = params
        .style_wishes
        .iter()
        .map(|w| sanitize(w))
        .filter(|w| !w.is_empty())
        .collect();
    let wishes_line = if wishes.is_empty() {
        String::new()
    } else {
        format!("\nSTYLE/WISHES: {}", wishes.join(", "))
    };

    format!(
        r#"You are an experienced chef and meal planner. Create {meals} different recipes, each for {people} people.

DIET: {diet}
OUTPUT LANGUAGE: {language}{wishes_line}

{pantry_section}{spice_section}

{rules}
{schema}"#,
        meals = params.meals,
        people = params.people,
        diet = diet,
        language = language,
        wishes_line = wishes_line,
        pantry_section = pantry_section,
        spice_section = spice_section,
        rules = GENERATION_RULES,
        schema = SCHEMA_EXAMPLE,
    )
}
