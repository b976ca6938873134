//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use menucheck_domain::{
    format_additives, format_allergens, AdditiveCode, AllergenCode, CanonicalProduct, ExportMode,
};
use menucheck_importer::ImportResult;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    mode: ExportMode,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, mode: ExportMode, color_enabled: bool) -> Self {
        Self {
            format,
            mode,
            color_enabled,
        }
    }

    /// Format an import result: products, then warnings.
    pub fn format_import(&self, result: &ImportResult) -> Result<String> {
        match self.format {
            CliFormat::Json => self.format_import_json(result),
            CliFormat::Table => Ok(self.format_import_table(result)),
        }
    }

    fn format_import_json(&self, result: &ImportResult) -> Result<String> {
        let products: Vec<serde_json::Value> = result
            .products
            .iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.id.to_string(),
                    "name": p.name,
                    "allergens": self.allergen_list(&p.allergens),
                    "additives": self.additive_list(&p.additives),
                })
            })
            .collect();
        let warnings: Vec<String> = result.warnings.iter().map(ToString::to_string).collect();

        Ok(serde_json::to_string_pretty(&serde_json::json!({
            "products": products,
            "warnings": warnings,
        }))?)
    }

    fn format_import_table(&self, result: &ImportResult) -> String {
        let mut sections = Vec::new();

        if result.products.is_empty() {
            sections.push(self.colorize("No products imported.", "yellow"));
        } else {
            sections.push(self.products_table(&result.products));
            sections.push(self.success(&format!("Imported {} product(s)", result.products.len())));

            let undeclared = result
                .products
                .iter()
                .filter(|p| p.has_missing_declarations())
                .count();
            if undeclared > 0 {
                sections.push(self.warning(&format!(
                    "{} product(s) declare no allergens or additives",
                    undeclared
                )));
            }
        }

        for warning in &result.warnings {
            sections.push(self.warning(&warning.to_string()));
        }

        sections.join("\n")
    }

    fn products_table(&self, products: &[CanonicalProduct]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Product", "Allergens", "Additives"]);

        for product in products {
            builder.push_record([
                product.name.clone(),
                format_allergens(&product.allergens, self.mode),
                format_additives(&product.additives, self.mode),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the code vocabulary.
    pub fn format_codes(&self) -> Result<String> {
        match self.format {
            CliFormat::Json => {
                let entries = |key: &str, code: String, label: &str| {
                    serde_json::json!({ "key": key, "code": code, "label": label })
                };
                let allergens: Vec<serde_json::Value> = AllergenCode::ALL
                    .iter()
                    .map(|c| entries(c.key(), c.display_code(), c.label()))
                    .collect();
                let additives: Vec<serde_json::Value> = AdditiveCode::ALL
                    .iter()
                    .map(|c| entries(c.key(), c.key().to_string(), c.label()))
                    .collect();

                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "allergens": allergens,
                    "additives": additives,
                }))?)
            }
            CliFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Kind", "Code", "Label"]);
                for code in AllergenCode::ALL {
                    builder.push_record(["Allergen".to_string(), code.display_code(), code.label().to_string()]);
                }
                for code in AdditiveCode::ALL {
                    builder.push_record(["Additive".to_string(), code.key().to_string(), code.label().to_string()]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(table.to_string())
            }
        }
    }

    fn allergen_list(&self, codes: &[AllergenCode]) -> Vec<String> {
        codes
            .iter()
            .map(|c| match self.mode {
                ExportMode::Codes => c.key().to_string(),
                ExportMode::Cleartext => c.label().to_string(),
            })
            .collect()
    }

    fn additive_list(&self, codes: &[AdditiveCode]) -> Vec<String> {
        codes
            .iter()
            .map(|c| match self.mode {
                ExportMode::Codes => c.key().to_string(),
                ExportMode::Cleartext => c.label().to_string(),
            })
            .collect()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
