//! JSON schemas handed to the provider as output contracts

use crate::contract::{MAX_NAME_CHARS, MAX_PRODUCTS, MAX_REASONING_CHARS, MAX_WARNINGS};
use menucheck_domain::{AdditiveCode, AllergenCode, OutputSchema};
use serde_json::{json, Value};

/// Schema name of the menu extraction contract
pub const MENU_SCHEMA_NAME: &str = "menu_parse_result";

/// Schema name of the suggestion contract
pub const SUGGESTION_SCHEMA_NAME: &str = "allergen_suggestion";

fn allergen_array() -> Value {
    let keys: Vec<&str> = AllergenCode::ALL.iter().map(|code| code.key()).collect();
    json!({ "type": "array", "items": { "type": "string", "enum": keys } })
}

fn additive_array() -> Value {
    let keys: Vec<&str> = AdditiveCode::ALL.iter().map(|code| code.key()).collect();
    json!({ "type": "array", "items": { "type": "string", "enum": keys } })
}

/// Output contract for menu extraction
pub fn menu_parse_schema() -> OutputSchema {
    let schema = json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["products", "warnings"],
        "properties": {
            "products": {
                "type": "array",
                "maxItems": MAX_PRODUCTS,
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["name", "allergens", "additives"],
                    "properties": {
                        "name": { "type": "string", "minLength": 1, "maxLength": MAX_NAME_CHARS },
                        "allergens": allergen_array(),
                        "additives": additive_array(),
                    }
                }
            },
            "warnings": {
                "type": "array",
                "maxItems": MAX_WARNINGS,
                "items": { "type": "string" }
            }
        }
    });

    OutputSchema {
        name: MENU_SCHEMA_NAME.to_string(),
        schema: schema.to_string(),
    }
}

/// Output contract for a single-product allergen suggestion
pub fn allergen_suggestion_schema() -> OutputSchema {
    let schema = json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["allergens", "additives", "reasoning"],
        "properties": {
            "allergens": allergen_array(),
            "additives": additive_array(),
            "reasoning": { "type": "string", "minLength": 1, "maxLength": MAX_REASONING_CHARS }
        }
    });

    OutputSchema {
        name: SUGGESTION_SCHEMA_NAME.to_string(),
        schema: schema.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_schema_restricts_codes() {
        let schema = menu_parse_schema();
        assert_eq!(schema.name, "menu_parse_result");

        let value: Value = serde_json::from_str(&schema.schema).unwrap();
        let product = &value["properties"]["products"]["items"];
        assert_eq!(product["additionalProperties"], false);
        assert_eq!(product["properties"]["allergens"]["items"]["enum"][0], "a");
        assert_eq!(product["properties"]["allergens"]["items"]["enum"][13], "n");
        assert_eq!(product["properties"]["additives"]["items"]["enum"][9], "10");
        assert_eq!(product["properties"]["name"]["maxLength"], 180);
        assert_eq!(value["properties"]["products"]["maxItems"], 300);
        assert_eq!(value["properties"]["warnings"]["maxItems"], 50);
    }

    #[test]
    fn test_suggestion_schema() {
        let schema = allergen_suggestion_schema();
        let value: Value = serde_json::from_str(&schema.schema).unwrap();
        assert_eq!(value["required"], json!(["allergens", "additives", "reasoning"]));
        assert_eq!(value["properties"]["reasoning"]["maxLength"], 800);
    }
}
