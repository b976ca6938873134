//! Validation of provider output against the extraction contracts
//!
//! The provider is asked for schema-conforming output, but its answer is
//! still untrusted. Every response is walked field by field here; the first
//! violation rejects the whole response.

use menucheck_domain::{AdditiveCode, AllergenCode, ProductCandidate};
use serde_json::{Map, Value};
use thiserror::Error;

/// Maximum number of products in one extraction
pub const MAX_PRODUCTS: usize = 300;

/// Maximum number of model warnings in one extraction
pub const MAX_WARNINGS: usize = 50;

/// Maximum product name length (characters)
pub const MAX_NAME_CHARS: usize = 180;

/// Maximum suggestion reasoning length (characters)
pub const MAX_REASONING_CHARS: usize = 800;

/// Why a provider response was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    /// No content at all
    #[error("Empty response")]
    EmptyResponse,

    /// Not parseable as JSON
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    /// A value has the wrong JSON type
    #[error("{path}: expected {expected}")]
    WrongType {
        /// Location in the response
        path: String,
        /// Expected JSON type
        expected: &'static str,
    },

    /// A required field is absent
    #[error("{0}: missing field")]
    MissingField(String),

    /// A field outside the contract is present
    #[error("{0}: unexpected field")]
    UnexpectedField(String),

    /// Allergen code outside the vocabulary
    #[error("{path}: unknown allergen code '{value}'")]
    UnknownAllergen {
        /// Location in the response
        path: String,
        /// Offending value
        value: String,
    },

    /// Additive code outside the vocabulary
    #[error("{path}: unknown additive code '{value}'")]
    UnknownAdditive {
        /// Location in the response
        path: String,
        /// Offending value
        value: String,
    },

    /// An array exceeds its item limit
    #[error("{path}: {actual} items (max: {max})")]
    TooManyItems {
        /// Location in the response
        path: String,
        /// Item limit
        max: usize,
        /// Items received
        actual: usize,
    },

    /// A string length is outside its bounds
    #[error("{path}: length {actual} outside {min}..={max}")]
    LengthOutOfRange {
        /// Location in the response
        path: String,
        /// Minimum length (characters)
        min: usize,
        /// Maximum length (characters)
        max: usize,
        /// Length received (characters)
        actual: usize,
    },
}

/// A validated menu extraction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionContract {
    /// Products in response order; names not yet trimmed or deduplicated
    pub products: Vec<ProductCandidate>,

    /// Warnings reported by the provider
    pub warnings: Vec<String>,
}

/// A validated allergen suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllergenSuggestion {
    /// Suggested allergen codes
    pub allergens: Vec<AllergenCode>,

    /// Suggested additive codes
    pub additives: Vec<AdditiveCode>,

    /// Explanation for the user
    pub reasoning: String,
}

/// Strip a surrounding markdown code fence (```` ```json ... ``` ````)
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. `json`) up to the end of the opening line
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn parse_object(raw: &str) -> Result<Map<String, Value>, ContractViolation> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(ContractViolation::EmptyResponse);
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ContractViolation::WrongType {
            path: "$".to_string(),
            expected: "object",
        }),
        Err(e) => Err(ContractViolation::MalformedJson(e.to_string())),
    }
}

fn check_fields(
    object: &Map<String, Value>,
    path: &str,
    allowed: &[&str],
) -> Result<(), ContractViolation> {
    if let Some(unexpected) = object.keys().find(|key| !allowed.contains(&key.as_str())) {
        return Err(ContractViolation::UnexpectedField(format!("{}.{}", path, unexpected)));
    }
    if let Some(missing) = allowed.iter().find(|key| !object.contains_key(**key)) {
        return Err(ContractViolation::MissingField(format!("{}.{}", path, missing)));
    }
    Ok(())
}

fn as_array<'a>(value: &'a Value, path: &str, max: Option<usize>) -> Result<&'a [Value], ContractViolation> {
    let items = value.as_array().ok_or_else(|| ContractViolation::WrongType {
        path: path.to_string(),
        expected: "array",
    })?;
    if let Some(max) = max {
        if items.len() > max {
            return Err(ContractViolation::TooManyItems {
                path: path.to_string(),
                max,
                actual: items.len(),
            });
        }
    }
    Ok(items)
}

fn as_str<'a>(value: &'a Value, path: &str) -> Result<&'a str, ContractViolation> {
    value.as_str().ok_or_else(|| ContractViolation::WrongType {
        path: path.to_string(),
        expected: "string",
    })
}

fn bounded_str<'a>(value: &'a Value, path: &str, min: usize, max: usize) -> Result<&'a str, ContractViolation> {
    let text = as_str(value, path)?;
    let length = text.chars().count();
    if length < min || length > max {
        return Err(ContractViolation::LengthOutOfRange {
            path: path.to_string(),
            min,
            max,
            actual: length,
        });
    }
    Ok(text)
}

fn allergen_codes(value: &Value, path: &str) -> Result<Vec<AllergenCode>, ContractViolation> {
    as_array(value, path, None)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = format!("{}[{}]", path, i);
            let key = as_str(item, &item_path)?;
            AllergenCode::from_key(key).ok_or_else(|| ContractViolation::UnknownAllergen {
                path: item_path,
                value: key.to_string(),
            })
        })
        .collect()
}

fn additive_codes(value: &Value, path: &str) -> Result<Vec<AdditiveCode>, ContractViolation> {
    as_array(value, path, None)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = format!("{}[{}]", path, i);
            let key = as_str(item, &item_path)?;
            AdditiveCode::from_key(key).ok_or_else(|| ContractViolation::UnknownAdditive {
                path: item_path,
                value: key.to_string(),
            })
        })
        .collect()
}

fn product(value: &Value, path: &str) -> Result<ProductCandidate, ContractViolation> {
    let object = value.as_object().ok_or_else(|| ContractViolation::WrongType {
        path: path.to_string(),
        expected: "object",
    })?;
    check_fields(object, path, &["name", "allergens", "additives"])?;

    let name = bounded_str(&object["name"], &format!("{}.name", path), 1, MAX_NAME_CHARS)?;
    let allergens = allergen_codes(&object["allergens"], &format!("{}.allergens", path))?;
    let additives = additive_codes(&object["additives"], &format!("{}.additives", path))?;

    Ok(ProductCandidate::new(name)
        .with_allergens(allergens)
        .with_additives(additives))
}

/// Validate a menu extraction response
///
/// # Errors
///
/// Returns the first [`ContractViolation`] found; nothing is returned from
/// a response that fails anywhere
pub fn validate_menu_response(raw: &str) -> Result<ExtractionContract, ContractViolation> {
    let object = parse_object(raw)?;
    check_fields(&object, "$", &["products", "warnings"])?;

    let products = as_array(&object["products"], "$.products", Some(MAX_PRODUCTS))?
        .iter()
        .enumerate()
        .map(|(i, item)| product(item, &format!("$.products[{}]", i)))
        .collect::<Result<Vec<_>, _>>()?;

    let warnings = as_array(&object["warnings"], "$.warnings", Some(MAX_WARNINGS))?
        .iter()
        .enumerate()
        .map(|(i, item)| as_str(item, &format!("$.warnings[{}]", i)).map(str::to_string))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExtractionContract { products, warnings })
}

/// Validate an allergen suggestion response
///
/// # Errors
///
/// Returns the first [`ContractViolation`] found
pub fn validate_suggestion_response(raw: &str) -> Result<AllergenSuggestion, ContractViolation> {
    let object = parse_object(raw)?;
    check_fields(&object, "$", &["allergens", "additives", "reasoning"])?;

    Ok(AllergenSuggestion {
        allergens: allergen_codes(&object["allergens"], "$.allergens")?,
        additives: additive_codes(&object["additives"], "$.additives")?,
        reasoning: bounded_str(&object["reasoning"], "$.reasoning", 1, MAX_REASONING_CHARS)?
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_menu_response() {
        let raw = r#"{
            "products": [
                {"name": "Wiener Schnitzel", "allergens": ["a", "c", "g"], "additives": []},
                {"name": "Cola", "allergens": [], "additives": ["1", "10"]}
            ],
            "warnings": ["Prices were ignored."]
        }"#;

        let contract = validate_menu_response(raw).unwrap();
        assert_eq!(contract.products.len(), 2);
        assert_eq!(
            contract.products[0].allergens,
            vec![AllergenCode::A, AllergenCode::C, AllergenCode::G]
        );
        assert_eq!(
            contract.products[1].additives,
            vec![AdditiveCode::Colouring, AdditiveCode::Phenylalanine]
        );
        assert_eq!(contract.warnings, vec!["Prices were ignored."]);
    }

    #[test]
    fn test_code_fence_is_stripped() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{}\n```  "), "{}");
        assert_eq!(strip_code_fence("  {}  "), "{}");

        let raw = "```json\n{\"products\": [], \"warnings\": []}\n```";
        assert!(validate_menu_response(raw).is_ok());
    }

    #[test]
    fn test_unknown_code_rejects_whole_response() {
        let raw = json!({
            "products": [
                {"name": "Suppe", "allergens": ["i"], "additives": []},
                {"name": "Brot", "allergens": ["x"], "additives": []}
            ],
            "warnings": []
        })
        .to_string();

        let result = validate_menu_response(&raw);
        assert_eq!(
            result,
            Err(ContractViolation::UnknownAllergen {
                path: "$.products[1].allergens[0]".to_string(),
                value: "x".to_string(),
            })
        );
    }

    #[test]
    fn test_display_case_codes_are_not_keys() {
        let raw = r#"{"products":[{"name":"Brot","allergens":["A"],"additives":[]}],"warnings":[]}"#;
        assert!(matches!(
            validate_menu_response(raw),
            Err(ContractViolation::UnknownAllergen { .. })
        ));

        let raw = r#"{"products":[{"name":"Brot","allergens":[],"additives":["11"]}],"warnings":[]}"#;
        assert!(matches!(
            validate_menu_response(raw),
            Err(ContractViolation::UnknownAdditive { .. })
        ));
    }

    #[test]
    fn test_envelope_violations() {
        assert_eq!(validate_menu_response("   "), Err(ContractViolation::EmptyResponse));
        assert!(matches!(
            validate_menu_response("not json"),
            Err(ContractViolation::MalformedJson(_))
        ));
        assert!(matches!(
            validate_menu_response("[]"),
            Err(ContractViolation::WrongType { expected: "object", .. })
        ));
        assert_eq!(
            validate_menu_response(r#"{"products": []}"#),
            Err(ContractViolation::MissingField("$.warnings".to_string()))
        );
        assert_eq!(
            validate_menu_response(r#"{"products": [], "warnings": [], "extra": 1}"#),
            Err(ContractViolation::UnexpectedField("$.extra".to_string()))
        );
    }

    #[test]
    fn test_product_violations() {
        let missing = r#"{"products":[{"name":"Brot","allergens":[]}],"warnings":[]}"#;
        assert_eq!(
            validate_menu_response(missing),
            Err(ContractViolation::MissingField("$.products[0].additives".to_string()))
        );

        let empty_name = r#"{"products":[{"name":"","allergens":[],"additives":[]}],"warnings":[]}"#;
        assert!(matches!(
            validate_menu_response(empty_name),
            Err(ContractViolation::LengthOutOfRange { min: 1, actual: 0, .. })
        ));

        let long_name = json!({
            "products": [{"name": "ä".repeat(181), "allergens": [], "additives": []}],
            "warnings": []
        })
        .to_string();
        assert!(matches!(
            validate_menu_response(&long_name),
            Err(ContractViolation::LengthOutOfRange { actual: 181, .. })
        ));

        let wrong_type = r#"{"products":[{"name":"Brot","allergens":"a","additives":[]}],"warnings":[]}"#;
        assert!(matches!(
            validate_menu_response(wrong_type),
            Err(ContractViolation::WrongType { expected: "array", .. })
        ));
    }

    #[test]
    fn test_item_limits() {
        let product = json!({"name": "x", "allergens": [], "additives": []});
        let raw = json!({
            "products": vec![product; MAX_PRODUCTS + 1],
            "warnings": []
        })
        .to_string();
        assert_eq!(
            validate_menu_response(&raw),
            Err(ContractViolation::TooManyItems {
                path: "$.products".to_string(),
                max: 300,
                actual: 301,
            })
        );

        let raw = json!({"products": [], "warnings": vec!["w"; MAX_WARNINGS + 1]}).to_string();
        assert!(matches!(
            validate_menu_response(&raw),
            Err(ContractViolation::TooManyItems { max: 50, .. })
        ));
    }

    #[test]
    fn test_suggestion_response() {
        let raw = r#"{"allergens":["g","a","g"],"additives":[],"reasoning":"Cheese and flour."}"#;
        let suggestion = validate_suggestion_response(raw).unwrap();
        assert_eq!(
            suggestion.allergens,
            vec![AllergenCode::G, AllergenCode::A, AllergenCode::G]
        );
        assert_eq!(suggestion.reasoning, "Cheese and flour.");

        let raw = r#"{"allergens":[],"additives":[],"reasoning":""}"#;
        assert!(matches!(
            validate_suggestion_response(raw),
            Err(ContractViolation::LengthOutOfRange { .. })
        ));
    }
}
