use serde::{Deserialize, Serialize};

/// A recipe ingredient. `item` and `amount` are always kept apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub item: String,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Ingredient {
    pub fn new(item: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            amount: amount.into(),
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Identity used for list membership and deduplication: `item|amount`,
    /// case-sensitive. The unit is not part of the identity.
    pub fn identity_key(&self) -> String {
        format!("{}|{}", self.item, self.amount)
    }
}

/// Per-serving nutrition estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Nutrition {
    pub calories: f64,
    pub carbs: f64,
    pub fat: f64,
    pub protein: f64,
}

/// A generated recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub time: String,
    /// Everything the recipe needs, owned and to-buy.
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    /// Pantry item IDs (or free text) the model says it used.
    pub used_ingredients: Vec<String>,
    /// The to-buy subset of `ingredients`. `None` and `Some(vec![])` are
    /// different states: recipes rebuilt from a shared link carry `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_ingredients: Option<Vec<Ingredient>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl Recipe {
    /// Identity keys of the ingredients this recipe has to buy.
    pub fn missing_ingredient_keys(&self) -> Vec<String> {
        self.missing_ingredients
            .iter()
            .flatten()
            .map(Ingredient::identity_key)
            .collect()
    }

    /// Whether `ingredient` is on this recipe's to-buy list, matched by content.
    pub fn is_missing(&self, ingredient: &Ingredient) -> bool {
        let key = ingredient.identity_key();
        self.missing_ingredients
            .iter()
            .flatten()
            .any(|m| m.identity_key() == key)
    }
}

/// The top-level generated artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub recipes: Vec<Recipe>,
    /// Missing ingredients aggregated across all recipes.
    pub shopping_list: Vec<Ingredient>,
}

impl MealPlan {
    /// The shopping list with repeated identities dropped, first occurrence
    /// wins and order is preserved. The plan itself is left untouched.
    pub fn shopping_list_deduplicated(&self) -> Vec<Ingredient> {
        let mut seen = std::collections::HashSet::new();
        self.shopping_list
            .iter()
            .filter(|ing| seen.insert(ing.identity_key()))
            .cloned()
            .collect()
    }
}

/// A user-owned ingredient. `id` is system-generated and is echoed back by the
/// model in `usedIngredients`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PantryItem {
    pub id: String,
    pub name: String,
    pub amount: String,
}

impl PantryItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount: amount.into(),
        }
    }
}

/// Everything the prompt builder needs to render a meal-plan request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipePromptParams {
    pub ingredients: Vec<PantryItem>,
    pub people: u32,
    pub meals: u32,
    pub diet: String,
    pub language: String,
    #[serde(default)]
    pub spices: Vec<String>,
    #[serde(default)]
    pub style_wishes: Vec<String>,
}
