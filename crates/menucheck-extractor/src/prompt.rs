//! Prompts for transcription, menu extraction and allergen suggestion

use menucheck_domain::{AdditiveCode, AllergenCode, ImageInput, Prompt};

fn allergen_list() -> String {
    AllergenCode::ALL
        .iter()
        .map(|code| format!("{}: {}", code.display_code(), code.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn additive_list() -> String {
    AdditiveCode::ALL
        .iter()
        .map(|code| format!("{}: {}", code.key(), code.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn allergen_keys() -> String {
    AllergenCode::ALL
        .iter()
        .map(|code| code.display_code())
        .collect::<Vec<_>>()
        .join(", ")
}

fn additive_keys() -> String {
    AdditiveCode::ALL
        .iter()
        .map(|code| code.key())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the menu extraction prompt
pub struct PromptBuilder {
    text: String,
}

impl PromptBuilder {
    /// Create a new prompt builder over the combined menu text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> Prompt {
        let mut system = String::new();
        system.push_str(MENU_INSTRUCTIONS);
        system.push_str(&format!(
            "- Use only these allergen keys: {}\n",
            allergen_keys()
        ));
        system.push_str(&format!(
            "- Use only these additive keys: {}\n\n",
            additive_keys()
        ));
        system.push_str("Allergens (A-N):\n");
        system.push_str(&allergen_list());
        system.push_str("\n\nAdditives (1-10):\n");
        system.push_str(&additive_list());
        system.push('\n');

        let mut user = String::new();
        user.push_str("Menu text:\n");
        user.push_str("---\n");
        user.push_str(&self.text);
        user.push_str("\n---\n");

        Prompt::new(system, user)
    }
}

/// Prompt asking for a likely allergen/additive declaration for one product
pub fn suggestion_prompt(product_name: &str) -> Prompt {
    let system = format!(
        "{}Use only these allergen keys: {}.\nUse only these additive keys: {}.\n",
        SUGGESTION_INSTRUCTIONS,
        allergen_keys(),
        additive_keys()
    );
    let user = format!(
        "Product name: {}\n\nAllergens (A-N):\n{}\n\nAdditives (1-10):\n{}\n\nReturn the likely allergens and additives for this product.\n",
        product_name,
        allergen_list(),
        additive_list()
    );
    Prompt::new(system, user)
}

/// Prompt asking for a verbatim transcription of a menu image
pub fn transcription_prompt(image: ImageInput) -> Prompt {
    Prompt::new(TRANSCRIPTION_INSTRUCTIONS, "Transcribe the menu in this image.").with_image(image)
}

const MENU_INSTRUCTIONS: &str = r#"Analyze the menu and return a structured product list.
Rules:
- Extract only actual dishes and drinks as products.
- Ignore headings, prices, decorative text and category names.
- Keep product names as written on the menu.
- Codes printed next to a dish are authoritative; otherwise propose conservative, plausible codes.
- Report anything you could not interpret in warnings.
"#;

const SUGGESTION_INSTRUCTIONS: &str = r#"You assist restaurants with allergen labelling under EU food information rules (LMIV).
Answer ONLY as JSON in the given schema.
If unsure, say so in reasoning and suggest the likely matches.
"#;

const TRANSCRIPTION_INSTRUCTIONS: &str = r#"You transcribe photographed or scanned restaurant menus.
Return the menu text exactly as printed, one dish per line, including any allergen or additive codes next to it.
Do not translate, summarize or add commentary. If the image contains no readable text, return nothing."#;
