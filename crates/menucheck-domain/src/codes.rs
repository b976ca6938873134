//! Code registry - the closed allergen and additive vocabularies
//!
//! Allergens follow the 14 declarable allergens of the EU food information
//! regulation (LMIV), keyed `a`-`n`. Additives follow the customary German
//! menu footnotes, keyed `1`-`10`. Both sets are fixed for the lifetime of the
//! process; anything outside them is invalid.

use std::fmt;

/// One of the 14 declarable allergens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AllergenCode {
    /// Cereals containing gluten
    A,
    /// Crustaceans
    B,
    /// Eggs
    C,
    /// Fish
    D,
    /// Peanuts
    E,
    /// Soybeans
    F,
    /// Milk (including lactose)
    G,
    /// Tree nuts
    H,
    /// Celery
    I,
    /// Mustard
    J,
    /// Sesame seeds
    K,
    /// Sulphur dioxide and sulphites
    L,
    /// Lupin
    M,
    /// Molluscs
    N,
}

impl AllergenCode {
    /// All allergen codes in registry order
    pub const ALL: [AllergenCode; 14] = [
        AllergenCode::A,
        AllergenCode::B,
        AllergenCode::C,
        AllergenCode::D,
        AllergenCode::E,
        AllergenCode::F,
        AllergenCode::G,
        AllergenCode::H,
        AllergenCode::I,
        AllergenCode::J,
        AllergenCode::K,
        AllergenCode::L,
        AllergenCode::M,
        AllergenCode::N,
    ];

    /// Canonical key (lower-case letter) as used on the wire
    pub fn key(&self) -> &'static str {
        match self {
            AllergenCode::A => "a",
            AllergenCode::B => "b",
            AllergenCode::C => "c",
            AllergenCode::D => "d",
            AllergenCode::E => "e",
            AllergenCode::F => "f",
            AllergenCode::G => "g",
            AllergenCode::H => "h",
            AllergenCode::I => "i",
            AllergenCode::J => "j",
            AllergenCode::K => "k",
            AllergenCode::L => "l",
            AllergenCode::M => "m",
            AllergenCode::N => "n",
        }
    }

    /// Code as printed on menus (upper-case letter)
    pub fn display_code(&self) -> String {
        self.key().to_uppercase()
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            AllergenCode::A => "Glutenhaltiges Getreide",
            AllergenCode::B => "Krebstiere",
            AllergenCode::C => "Eier",
            AllergenCode::D => "Fisch",
            AllergenCode::E => "Erdnüsse",
            AllergenCode::F => "Sojabohnen",
            AllergenCode::G => "Milch",
            AllergenCode::H => "Schalenfrüchte",
            AllergenCode::I => "Sellerie",
            AllergenCode::J => "Senf",
            AllergenCode::K => "Sesamsamen",
            AllergenCode::L => "Schwefeldioxid und Sulfite",
            AllergenCode::M => "Lupinen",
            AllergenCode::N => "Weichtiere",
        }
    }

    /// Look up a code by its exact canonical key (`"a"`..`"n"`)
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.key() == key)
    }
}

impl fmt::Display for AllergenCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One of the 10 declarable additive groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdditiveCode {
    /// 1 - colouring
    Colouring,
    /// 2 - preservative
    Preservative,
    /// 3 - antioxidant
    Antioxidant,
    /// 4 - flavour enhancer
    FlavourEnhancer,
    /// 5 - sulphurised
    Sulphurised,
    /// 6 - blackened
    Blackened,
    /// 7 - waxed
    Waxed,
    /// 8 - phosphate
    Phosphate,
    /// 9 - sweetener
    Sweetener,
    /// 10 - source of phenylalanine
    Phenylalanine,
}

impl AdditiveCode {
    /// All additive codes in registry order
    pub const ALL: [AdditiveCode; 10] = [
        AdditiveCode::Colouring,
        AdditiveCode::Preservative,
        AdditiveCode::Antioxidant,
        AdditiveCode::FlavourEnhancer,
        AdditiveCode::Sulphurised,
        AdditiveCode::Blackened,
        AdditiveCode::Waxed,
        AdditiveCode::Phosphate,
        AdditiveCode::Sweetener,
        AdditiveCode::Phenylalanine,
    ];

    /// Numeric code (1-10)
    pub fn number(&self) -> u8 {
        match self {
            AdditiveCode::Colouring => 1,
            AdditiveCode::Preservative => 2,
            AdditiveCode::Antioxidant => 3,
            AdditiveCode::FlavourEnhancer => 4,
            AdditiveCode::Sulphurised => 5,
            AdditiveCode::Blackened => 6,
            AdditiveCode::Waxed => 7,
            AdditiveCode::Phosphate => 8,
            AdditiveCode::Sweetener => 9,
            AdditiveCode::Phenylalanine => 10,
        }
    }

    /// Canonical key (decimal digits) as used on the wire
    pub fn key(&self) -> &'static str {
        match self {
            AdditiveCode::Colouring => "1",
            AdditiveCode::Preservative => "2",
            AdditiveCode::Antioxidant => "3",
            AdditiveCode::FlavourEnhancer => "4",
            AdditiveCode::Sulphurised => "5",
            AdditiveCode::Blackened => "6",
            AdditiveCode::Waxed => "7",
            AdditiveCode::Phosphate => "8",
            AdditiveCode::Sweetener => "9",
            AdditiveCode::Phenylalanine => "10",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            AdditiveCode::Colouring => "mit Farbstoff",
            AdditiveCode::Preservative => "mit Konservierungsstoff",
            AdditiveCode::Antioxidant => "mit Antioxidationsmittel",
            AdditiveCode::FlavourEnhancer => "mit Geschmacksverstärker",
            AdditiveCode::Sulphurised => "geschwefelt",
            AdditiveCode::Blackened => "geschwärzt",
            AdditiveCode::Waxed => "gewachst",
            AdditiveCode::Phosphate => "mit Phosphat",
            AdditiveCode::Sweetener => "mit Süßungsmittel(n)",
            AdditiveCode::Phenylalanine => "enthält eine Phenylalaninquelle",
        }
    }

    /// Look up a code by its number
    pub fn from_number(number: u64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|code| u64::from(code.number()) == number)
    }

    /// Look up a code by its exact canonical key (`"1"`..`"10"`)
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.key() == key)
    }
}

impl fmt::Display for AdditiveCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How codes are rendered for people
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// Short codes (`A, C, G` / `1, 4`)
    #[default]
    Codes,
    /// Full labels
    Cleartext,
}

/// Render allergen codes as a comma-separated list
pub fn format_allergens(codes: &[AllergenCode], mode: ExportMode) -> String {
    codes
        .iter()
        .map(|code| match mode {
            ExportMode::Codes => code.display_code(),
            ExportMode::Cleartext => code.label().to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render additive codes as a comma-separated list
pub fn format_additives(codes: &[AdditiveCode], mode: ExportMode) -> String {
    codes
        .iter()
        .map(|code| match mode {
            ExportMode::Codes => code.key().to_string(),
            ExportMode::Cleartext => code.label().to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
