//! Token resolution - mapping user-entered strings onto registry codes
//!
//! Every ingestion path that accepts free-form code fields funnels through
//! this module, so the resolution order lives in exactly one place:
//!
//! 1. trim and lowercase the token
//! 2. try it as a code (single letter / number)
//! 3. try it as a label (case-insensitive exact match)
//! 4. otherwise it is unresolved

use crate::codes::{AdditiveCode, AllergenCode};

/// Outcome of splitting and resolving one raw field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParse<T> {
    /// Resolved codes, unique, in order of first appearance
    pub keys: Vec<T>,

    /// Unresolved tokens, unique, in order of first appearance
    pub invalid_tokens: Vec<String>,
}

impl<T> Default for TokenParse<T> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            invalid_tokens: Vec::new(),
        }
    }
}

fn normalize_token(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Split a raw field on `;`, `,` or `|`, dropping empty tokens
pub fn split_token_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .split([';', ',', '|'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve a single token to an allergen code
///
/// # Examples
///
/// ```
/// use menucheck_domain::{resolve_allergen_token, AllergenCode};
///
/// assert_eq!(resolve_allergen_token(" (a) "), Some(AllergenCode::A));
/// assert_eq!(resolve_allergen_token("Sellerie"), Some(AllergenCode::I));
/// assert_eq!(resolve_allergen_token("X"), None);
/// ```
pub fn resolve_allergen_token(token: &str) -> Option<AllergenCode> {
    let normalized = normalize_token(token);
    if normalized.is_empty() {
        return None;
    }

    let letters: String = normalized
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    if letters.len() == 1 {
        if let Some(code) = AllergenCode::from_key(&letters) {
            return Some(code);
        }
    }

    AllergenCode::ALL
        .into_iter()
        .find(|code| code.label().to_lowercase() == normalized)
}

/// Resolve a single token to an additive code
///
/// # Examples
///
/// ```
/// use menucheck_domain::{resolve_additive_token, AdditiveCode};
///
/// assert_eq!(resolve_additive_token("02"), Some(AdditiveCode::Preservative));
/// assert_eq!(resolve_additive_token("Gewachst"), Some(AdditiveCode::Waxed));
/// assert_eq!(resolve_additive_token("11"), None);
/// ```
pub fn resolve_additive_token(token: &str) -> Option<AdditiveCode> {
    let normalized = normalize_token(token);
    if normalized.is_empty() {
        return None;
    }

    let digits: String = normalized.chars().filter(|c| c.is_ascii_digit()).collect();
    if !digits.is_empty() {
        // Overlong digit runs cannot be a code; fall through to the label path
        if let Ok(number) = digits.trim_start_matches('0').parse::<u64>() {
            if let Some(code) = AdditiveCode::from_number(number) {
                return Some(code);
            }
        }
    }

    AdditiveCode::ALL
        .into_iter()
        .find(|code| code.label().to_lowercase() == normalized)
}

fn parse_input<T: PartialEq>(value: &str, resolve: impl Fn(&str) -> Option<T>) -> TokenParse<T> {
    let mut parsed = TokenParse::default();

    for token in split_token_list(value) {
        match resolve(token) {
            Some(code) => {
                if !parsed.keys.contains(&code) {
                    parsed.keys.push(code);
                }
            }
            None => {
                if !parsed.invalid_tokens.iter().any(|t| t == token) {
                    parsed.invalid_tokens.push(token.to_string());
                }
            }
        }
    }

    parsed
}

/// Split and resolve a raw allergen field such as `"A, c | Milch"`
pub fn parse_allergen_input(value: &str) -> TokenParse<AllergenCode> {
    parse_input(value, resolve_allergen_token)
}

/// Split and resolve a raw additive field such as `"1;4;geschwefelt"`
pub fn parse_additive_input(value: &str) -> TokenParse<AdditiveCode> {
    parse_input(value, resolve_additive_token)
}
