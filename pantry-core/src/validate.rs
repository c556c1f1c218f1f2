//! Structural validation of normalized model output.
//!
//! The document is walked as a `serde_json::Value` first so a failure can name
//! the exact field path (`recipes[0].time`); only a document that passed the
//! walk is deserialized into [`MealPlan`]. Unknown fields are ignored.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::MealPlan;

/// Why a normalized response could not become a [`MealPlan`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Failed to parse JSON: {0}")]
    JsonSyntax(String),

    #[error("Invalid meal plan at {path}: {detail}")]
    Structure { path: String, detail: String },
}

impl ValidationError {
    fn structure(path: impl Into<String>, detail: impl Into<String>) -> Self {
        ValidationError::Structure {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Path of the first failing field, for structural errors.
    pub fn field_path(&self) -> Option<&str> {
        match self {
            ValidationError::Structure { path, .. } => Some(path),
            ValidationError::JsonSyntax(_) => None,
        }
    }
}

/// Parse and validate `normalized` into a [`MealPlan`].
pub fn validate(normalized: &str) -> Result<MealPlan, ValidationError> {
    let value: Value = serde_json::from_str(normalized).map_err(|e| {
        tracing::error!(error = %e, response = %normalized, "Model response is not valid JSON");
        ValidationError::JsonSyntax(e.to_string())
    })?;

    if let Err(e) = check_meal_plan(&value) {
        tracing::warn!(error = %e, "Model response does not match the meal plan shape");
        return Err(e);
    }

    serde_json::from_value(value).map_err(|e| {
        tracing::error!(error = %e, "Meal plan passed the structural check but failed to deserialize");
        ValidationError::structure("$", e.to_string())
    })
}

fn check_meal_plan(value: &Value) -> Result<(), ValidationError> {
    let obj = expect_object(value, "$")?;

    let recipes = require_array(obj, "recipes", "")?;
    for (i, recipe) in recipes.iter().enumerate() {
        check_recipe(recipe, &format!("recipes[{i}]"))?;
    }

    let shopping_list = require_array(obj, "shoppingList", "")?;
    check_ingredient_list(shopping_list, "shoppingList")?;

    Ok(())
}

fn check_recipe(value: &Value, path: &str) -> Result<(), ValidationError> {
    let obj = expect_object(value, path)?;

    require_string(obj, "id", path)?;
    require_string(obj, "title", path)?;
    require_string(obj, "time", path)?;

    let ingredients = require_array(obj, "ingredients", path)?;
    let ingredients_path = join(path, "ingredients");
    if ingredients.is_empty() {
        return Err(ValidationError::structure(
            ingredients_path,
            "must contain at least one ingredient",
        ));
    }
    check_ingredient_list(ingredients, &ingredients_path)?;

    check_string_list(
        require_array(obj, "instructions", path)?,
        &join(path, "instructions"),
    )?;
    check_string_list(
        require_array(obj, "usedIngredients", path)?,
        &join(path, "usedIngredients"),
    )?;

    if let Some(missing) = optional(obj, "missingIngredients") {
        let missing_path = join(path, "missingIngredients");
        let list = missing
            .as_array()
            .ok_or_else(|| type_error(&missing_path, "an array", missing))?;
        check_ingredient_list(list, &missing_path)?;
    }

    if let Some(nutrition) = optional(obj, "nutrition") {
        check_nutrition(nutrition, &join(path, "nutrition"))?;
    }

    optional_string(obj, "comments", path)?;

    Ok(())
}

fn check_ingredient_list(list: &[Value], path: &str) -> Result<(), ValidationError> {
    for (i, ingredient) in list.iter().enumerate() {
        let item_path = format!("{path}[{i}]");
        let obj = expect_object(ingredient, &item_path)?;
        require_string(obj, "item", &item_path)?;
        require_string(obj, "amount", &item_path)?;
        optional_string(obj, "unit", &item_path)?;
    }
    Ok(())
}

fn check_string_list(list: &[Value], path: &str) -> Result<(), ValidationError> {
    for (i, entry) in list.iter().enumerate() {
        if !entry.is_string() {
            return Err(type_error(&format!("{path}[{i}]"), "a string", entry));
        }
    }
    Ok(())
}

fn check_nutrition(value: &Value, path: &str) -> Result<(), ValidationError> {
    let obj = expect_object(value, path)?;
    for key in ["calories", "carbs", "fat", "protein"] {
        let field_path = join(path, key);
        match obj.get(key) {
            None => return Err(ValidationError::structure(field_path, "required field missing")),
            Some(v) if !v.is_number() => return Err(type_error(&field_path, "a number", v)),
            Some(_) => {}
        }
    }
    Ok(())
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| type_error(path, "an object", value))
}

fn require<'a>(obj: &'a Map<String, Value>, key: &str, path: &str) -> Result<&'a Value, ValidationError> {
    obj.get(key)
        .ok_or_else(|| ValidationError::structure(join(path, key), "required field missing"))
}

fn require_array<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a [Value], ValidationError> {
    let value = require(obj, key, path)?;
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| type_error(&join(path, key), "an array", value))
}

fn require_string(obj: &Map<String, Value>, key: &str, path: &str) -> Result<(), ValidationError> {
    let value = require(obj, key, path)?;
    if value.is_string() {
        Ok(())
    } else {
        Err(type_error(&join(path, key), "a string", value))
    }
}

fn optional_string(obj: &Map<String, Value>, key: &str, path: &str) -> Result<(), ValidationError> {
    match optional(obj, key) {
        Some(v) if !v.is_string() => Err(type_error(&join(path, key), "a string", v)),
        _ => Ok(()),
    }
}

/// Optional fields treat an explicit `null` the same as absence.
fn optional<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn type_error(path: &str, expected: &str, found: &Value) -> ValidationError {
    ValidationError::structure(path, format!("expected {expected}, found {}", kind_of(found)))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_recipe() -> Value {
        json!({
            "id": "r1",
            "title": "Chickpea Curry",
            "time": "35 min",
            "ingredients": [
                {"item": "chickpeas", "amount": "400", "unit": "g"},
                {"item": "coconut milk", "amount": "1", "unit": "can"}
            ],
            "instructions": ["Fry the onion.", "Simmer everything."],
            "usedIngredients": ["p-1"],
            "missingIngredients": [{"item": "coconut milk", "amount": "1", "unit": "can"}]
        })
    }

    fn plan_with(recipe: Value) -> String {
        json!({"recipes": [recipe], "shoppingList": []}).to_string()
    }

    fn structure_path(result: Result<MealPlan, ValidationError>) -> String {
        match result {
            Err(ValidationError::Structure { path, .. }) => path,
            other => panic!("expected structural error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_plan() {
        let plan = validate(&plan_with(valid_recipe())).unwrap();
        assert_eq!(plan.recipes.len(), 1);
        assert_eq!(plan.recipes[0].ingredients[0].unit.as_deref(), Some("g"));
        assert!(plan.shopping_list.is_empty());
    }

    #[test]
    fn test_empty_recipes_allowed() {
        let plan = validate(r#"{"recipes": [], "shoppingList": []}"#).unwrap();
        assert!(plan.recipes.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let result = validate("This is not valid JSON at all!");
        assert!(matches!(result, Err(ValidationError::JsonSyntax(_))));
    }

    #[test]
    fn test_missing_time_names_field() {
        let mut recipe = valid_recipe();
        recipe.as_object_mut().unwrap().remove("time");
        let result = validate(&plan_with(recipe));
        assert_eq!(structure_path(result), "recipes[0].time");
    }

    #[test]
    fn test_missing_shopping_list() {
        let result = validate(r#"{"recipes": []}"#);
        assert_eq!(structure_path(result), "shoppingList");
    }

    #[test]
    fn test_root_must_be_object() {
        assert_eq!(structure_path(validate("[]")), "$");
    }

    #[test]
    fn test_empty_ingredients_rejected() {
        let mut recipe = valid_recipe();
        recipe["ingredients"] = json!([]);
        assert_eq!(
            structure_path(validate(&plan_with(recipe))),
            "recipes[0].ingredients"
        );
    }

    #[test]
    fn test_ingredient_amount_must_be_string() {
        let mut recipe = valid_recipe();
        recipe["ingredients"][1]["amount"] = json!(1);
        let err = validate(&plan_with(recipe)).unwrap_err();
        assert_eq!(err.field_path(), Some("recipes[0].ingredients[1].amount"));
        assert!(err.to_string().contains("expected a string, found a number"));
    }

    #[test]
    fn test_instruction_entries_must_be_strings() {
        let mut recipe = valid_recipe();
        recipe["instructions"] = json!(["ok", {"step": 2}]);
        assert_eq!(
            structure_path(validate(&plan_with(recipe))),
            "recipes[0].instructions[1]"
        );
    }

    #[test]
    fn test_missing_ingredients_absent_vs_empty() {
        let mut recipe = valid_recipe();
        recipe.as_object_mut().unwrap().remove("missingIngredients");
        let plan = validate(&plan_with(recipe)).unwrap();
        assert_eq!(plan.recipes[0].missing_ingredients, None);

        let mut recipe = valid_recipe();
        recipe["missingIngredients"] = json!([]);
        let plan = validate(&plan_with(recipe)).unwrap();
        assert_eq!(plan.recipes[0].missing_ingredients, Some(vec![]));
    }

    #[test]
    fn test_missing_ingredients_must_be_array() {
        let mut recipe = valid_recipe();
        recipe["missingIngredients"] = json!({});
        let err = validate(&plan_with(recipe)).unwrap_err();
        assert_eq!(err.field_path(), Some("recipes[0].missingIngredients"));
        assert!(err.to_string().contains("expected an array"));
    }

    #[test]
    fn test_missing_ingredients_share_ingredient_shape() {
        let mut recipe = valid_recipe();
        recipe["missingIngredients"] = json!([{"item": "x"}]);
        assert_eq!(
            structure_path(validate(&plan_with(recipe))),
            "recipes[0].missingIngredients[0].amount"
        );
    }

    #[test]
    fn test_unit_must_be_string_when_present() {
        let mut recipe = valid_recipe();
        recipe["ingredients"][0]["unit"] = json!(5);
        assert_eq!(
            structure_path(validate(&plan_with(recipe.clone()))),
            "recipes[0].ingredients[0].unit"
        );

        recipe["ingredients"][0].as_object_mut().unwrap().remove("unit");
        let plan = validate(&plan_with(recipe)).unwrap();
        assert_eq!(plan.recipes[0].ingredients[0].unit, None);
    }

    #[test]
    fn test_nutrition_requires_all_fields() {
        let mut recipe = valid_recipe();
        recipe["nutrition"] = json!({"calories": 500, "carbs": 60, "fat": 12});
        assert_eq!(
            structure_path(validate(&plan_with(recipe))),
            "recipes[0].nutrition.protein"
        );

        let mut recipe = valid_recipe();
        recipe["nutrition"] = json!({"calories": "500", "carbs": 60, "fat": 12, "protein": 20});
        assert_eq!(
            structure_path(validate(&plan_with(recipe))),
            "recipes[0].nutrition.calories"
        );
    }

    #[test]
    fn test_nutrition_parsed() {
        let mut recipe = valid_recipe();
        recipe["nutrition"] = json!({"calories": 512.5, "carbs": 60, "fat": 12, "protein": 20});
        let plan = validate(&plan_with(recipe)).unwrap();
        let nutrition = plan.recipes[0].nutrition.unwrap();
        assert_eq!(nutrition.calories, 512.5);
        assert_eq!(nutrition.protein, 20.0);
    }

    #[test]
    fn test_comments_must_be_string() {
        let mut recipe = valid_recipe();
        recipe["comments"] = json!(["tip"]);
        assert_eq!(
            structure_path(validate(&plan_with(recipe))),
            "recipes[0].comments"
        );
    }

    #[test]
    fn test_null_optional_fields_are_absent() {
        let mut recipe = valid_recipe();
        recipe["comments"] = Value::Null;
        recipe["ingredients"][0]["unit"] = Value::Null;
        let plan = validate(&plan_with(recipe)).unwrap();
        assert_eq!(plan.recipes[0].comments, None);
        assert_eq!(plan.recipes[0].ingredients[0].unit, None);
    }

    #[test]
    fn test_shopping_list_element_shape() {
        let doc = json!({"recipes": [], "shoppingList": [{"item": "rice"}]}).to_string();
        assert_eq!(structure_path(validate(&doc)), "shoppingList[0].amount");
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let mut recipe = valid_recipe();
        recipe["difficulty"] = json!("easy");
        let doc = json!({"recipes": [recipe], "shoppingList": [], "notes": 1}).to_string();
        assert!(validate(&doc).is_ok());
    }
}
