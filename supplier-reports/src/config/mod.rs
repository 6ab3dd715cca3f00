//! Configuration file loading
//!
//! Settings live in `<config dir>/supplier-reports/config.toml`. The file is
//! optional; every key falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::reports::errors::ReportError;
use crate::reports::registry::{EXPORT_ORDERS_SHEET, PRODUCT_LIST_SHEET, Registry};
use crate::reports::types::Schema;

const APP_DIR: &str = "supplier-reports";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory reports are written to
    pub reports_dir: PathBuf,
    pub product_list_sheet: String,
    pub export_orders_sheet: String,
    /// Replaces the built-in report schemas when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_schemas: Option<Vec<Schema>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            reports_dir: PathBuf::from("reports"),
            product_list_sheet: PRODUCT_LIST_SHEET.to_string(),
            export_orders_sheet: EXPORT_ORDERS_SHEET.to_string(),
            report_schemas: None,
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from an explicit path, or from the default location.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    log::debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.check_report_schemas()?;
        Ok(config)
    }

    /// Schema registry for a generation pass
    pub fn registry(&self) -> Registry {
        let registry = Registry::new().with_sheets(&self.product_list_sheet, &self.export_orders_sheet);
        match &self.report_schemas {
            Some(schemas) => registry.with_reports(schemas.clone()),
            None => registry,
        }
    }

    fn check_report_schemas(&self) -> Result<(), ReportError> {
        for schema in self.report_schemas.iter().flatten() {
            if schema.match_row_key.is_none() || schema.match_row_value.is_none() {
                return Err(ReportError::config(format!(
                    "report schema '{}' needs match_row_key and match_row_value",
                    schema
                )));
            }
            if schema.report_fields.is_empty() {
                return Err(ReportError::config(format!(
                    "report schema '{}' has no report_fields",
                    schema
                )));
            }
            if let Some(field) = schema
                .new_fields()
                .iter()
                .find(|f| !schema.report_fields.contains(*f))
            {
                return Err(ReportError::config(format!(
                    "report schema '{}' declares new field '{}' outside report_fields",
                    schema, field
                )));
            }
        }
        Ok(())
    }
}
