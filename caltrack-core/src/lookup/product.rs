use serde::Deserialize;
use serde_json::Value;

use super::LookupError;

/// Name used when the database record has no product name.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown";

/// Top level of a product lookup response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductResponse {
    #[serde(default)]
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub nutriments: Option<Nutriments>,
}

/// Nutrient figures of a product. Only energy is read.
///
/// Values are kept as raw JSON because the database sometimes sends numbers
/// as strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Nutriments {
    #[serde(default)]
    pub energy_kcal_100g: Option<Value>,
    #[serde(default, rename = "energy-kcal_100g")]
    pub energy_kcal_100g_hyphenated: Option<Value>,
}

/// A product resolved to a loggable meal.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodItem {
    pub name: String,
    pub total_calories: f64,
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl Nutriments {
    /// Calories per 100 g, if present and positive.
    pub fn kcal_per_100g(&self) -> Option<f64> {
        [&self.energy_kcal_100g, &self.energy_kcal_100g_hyphenated]
            .into_iter()
            .flatten()
            .filter_map(as_number)
            .find(|kcal| kcal.is_finite() && *kcal > 0.0)
    }
}

impl Product {
    /// Display name, falling back to [`UNKNOWN_PRODUCT_NAME`].
    pub fn display_name(&self) -> &str {
        match self.product_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_PRODUCT_NAME,
        }
    }

    pub fn kcal_per_100g(&self) -> Option<f64> {
        self.nutriments.as_ref().and_then(Nutriments::kcal_per_100g)
    }
}

impl ProductResponse {
    /// Derives the meal for a portion of `portion_grams`.
    pub fn into_food(self, portion_grams: f64) -> Result<FoodItem, LookupError> {
        let product = self.product.ok_or(LookupError::NotFound)?;
        let per_100g = product
            .kcal_per_100g()
            .ok_or(LookupError::MissingNutrition)?;

        Ok(FoodItem {
            name: product.display_name().to_string(),
            total_calories: per_100g * portion_grams / 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ProductResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_derives_total_for_portion() {
        let response = parse(
            r#"{"product": {"product_name": "Granola", "nutriments": {"energy_kcal_100g": 250}}}"#,
        );
        let food = response.into_food(150.0).unwrap();
        assert_eq!(food.name, "Granola");
        assert_eq!(food.total_calories, 375.0);
    }

    #[test]
    fn test_missing_product_is_not_found() {
        let response = parse(r#"{"status": 0, "status_verbose": "product not found"}"#);
        assert_eq!(response.into_food(100.0), Err(LookupError::NotFound));
    }

    #[test]
    fn test_missing_energy_is_missing_nutrition() {
        let response = parse(r#"{"product": {"product_name": "Salt", "nutriments": {}}}"#);
        assert_eq!(response.into_food(100.0), Err(LookupError::MissingNutrition));

        let response = parse(r#"{"product": {"product_name": "Salt"}}"#);
        assert_eq!(response.into_food(100.0), Err(LookupError::MissingNutrition));
    }

    #[test]
    fn test_zero_energy_is_missing_nutrition() {
        let response = parse(
            r#"{"product": {"product_name": "Water",
                            "nutriments": {"energy_kcal_100g": 0}}}"#,
        );
        assert_eq!(response.into_food(500.0), Err(LookupError::MissingNutrition));
    }

    #[test]
    fn test_hyphenated_and_string_energy() {
        let response = parse(
            r#"{"product": {"product_name": "Cola", "nutriments": {"energy-kcal_100g": "42"}}}"#,
        );
        assert_eq!(response.into_food(330.0).unwrap().total_calories, 138.6);
    }

    #[test]
    fn test_unknown_name_fallback() {
        let response = parse(
            r#"{"product": {"product_name": "  ",
                            "nutriments": {"energy_kcal_100g": 100}}}"#,
        );
        assert_eq!(response.into_food(100.0).unwrap().name, UNKNOWN_PRODUCT_NAME);

        let response = parse(r#"{"product": {"nutriments": {"energy_kcal_100g": 100}}}"#);
        assert_eq!(response.into_food(100.0).unwrap().name, UNKNOWN_PRODUCT_NAME);
    }
}
