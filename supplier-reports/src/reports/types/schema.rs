//! Declarative schema descriptors
//!
//! A schema carries independently optional rules. Data schemas use the
//! validation rules (`primary_keys`, `not_empty`, `fill_missing`,
//! `fill_grouped`); report schemas use the projection rules
//! (`match_row_key`, `match_row_value`, `report_fields`, `new_fields`).

use serde::{Deserialize, Serialize};

use super::Value;

/// Fill an empty field from the first non-empty candidate column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillMissing {
    /// Target column
    pub field: String,
    /// Candidate columns, scanned in order
    pub from: Vec<String>,
}

impl FillMissing {
    pub fn new<S: Into<String>>(field: impl Into<String>, from: impl IntoIterator<Item = S>) -> Self {
        FillMissing {
            field: field.into(),
            from: from.into_iter().map(Into::into).collect(),
        }
    }
}

/// Propagate `by` columns across contiguous rows sharing the `on` column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillGrouped {
    /// Column whose value defines the group
    pub on: String,
    /// Columns back-filled across the group
    pub by: Vec<String>,
}

impl FillGrouped {
    pub fn new<S: Into<String>>(on: impl Into<String>, by: impl IntoIterator<Item = S>) -> Self {
        FillGrouped {
            on: on.into(),
            by: by.into_iter().map(Into::into).collect(),
        }
    }
}

/// Schema descriptor for validation or report projection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Schema {
    /// Human-readable label
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_empty: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_missing: Option<Vec<FillMissing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_grouped: Option<FillGrouped>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_row_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_row_value: Option<Value>,
    /// Output columns, in CSV order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub report_fields: Vec<String>,
    /// Report columns absent from the source rows, initialized to null
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_fields: Option<Vec<String>>,
}

fn strings<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Vec<String> {
    items.into_iter().map(Into::into).collect()
}

impl Schema {
    /// Create an empty schema with a description
    pub fn new(description: impl Into<String>) -> Self {
        Schema {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_primary_keys<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.primary_keys = Some(strings(keys));
        self
    }

    pub fn with_not_empty<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.not_empty = Some(strings(fields));
        self
    }

    pub fn with_fill_missing(mut self, rules: Vec<FillMissing>) -> Self {
        self.fill_missing = Some(rules);
        self
    }

    pub fn with_fill_grouped(mut self, rule: FillGrouped) -> Self {
        self.fill_grouped = Some(rule);
        self
    }

    /// Set the row filter used by report projection
    pub fn with_match(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.match_row_key = Some(key.into());
        self.match_row_value = Some(value.into());
        self
    }

    pub fn with_report_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.report_fields = strings(fields);
        self
    }

    pub fn with_new_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.new_fields = Some(strings(fields));
        self
    }

    /// Declared new fields, empty when none
    pub fn new_fields(&self) -> &[String] {
        self.new_fields.as_deref().unwrap_or(&[])
    }

    /// Whether this schema describes a report projection
    pub fn is_report(&self) -> bool {
        self.match_row_key.is_some()
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_from_toml() {
        let schema: Schema = toml::from_str(
            r#"
            description = "report schema Acme"
            match_row_key = "Vendor"
            match_row_value = "Acme"
            report_fields = ["Name", "Price"]
            new_fields = ["Price"]
            "#,
        )
        .unwrap();

        assert!(schema.is_report());
        assert_eq!(schema.match_row_value, Some(Value::from("Acme")));
        assert_eq!(schema.new_fields(), ["Price".to_string()]);
        assert!(schema.primary_keys.is_none());
    }

    #[test]
    fn test_schema_from_toml_rejects_unknown_rule() {
        let result: Result<Schema, _> = toml::from_str("description = \"x\"\nunique = [\"a\"]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_data_schema_from_toml() {
        let schema: Schema = toml::from_str(
            r#"
            description = "orders"
            fill_missing = [{ field = "Shipping Phone", from = ["Phone", "Billing Phone"] }]

            [fill_grouped]
            on = "Name"
            by = ["Shipping Name"]
            "#,
        )
        .unwrap();

        assert!(!schema.is_report());
        assert_eq!(
            schema.fill_missing,
            Some(vec![FillMissing::new("Shipping Phone", ["Phone", "Billing Phone"])])
        );
        assert_eq!(schema.fill_grouped, Some(FillGrouped::new("Name", ["Shipping Name"])));
    }
}
