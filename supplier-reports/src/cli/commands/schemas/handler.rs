//! Schemas command handler

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;

use super::{OutputFormat, SchemasCommands};
use crate::config::Config;
use crate::reports::{Registry, Schema};

#[derive(Serialize)]
struct SchemaListing<'a> {
    data_schemas: Vec<&'a Schema>,
    report_schemas: &'a [Schema],
}

pub fn handle_schemas_command(args: SchemasCommands) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let registry = config.registry();

    println!("{}", format_output(&registry, &args.format)?);
    Ok(())
}

fn format_output(registry: &Registry, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let listing = SchemaListing {
                data_schemas: registry.data_schemas().to_vec(),
                report_schemas: registry.reports(),
            };
            serde_json::to_string_pretty(&listing).context("Failed to format JSON output")
        }
        OutputFormat::Table => Ok(format_table(registry)),
    }
}

fn format_table(registry: &Registry) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "Data schemas".bold()));
    let sheets = [&registry.export_orders_sheet, &registry.product_list_sheet];
    for (schema, sheet) in registry.data_schemas().iter().zip(sheets) {
        out.push_str(&format!("  {} (sheet '{}')\n", schema.description, sheet.cyan()));
    }

    out.push_str(&format!("\n{}\n", "Report schemas".bold()));
    for schema in registry.reports() {
        let key = schema.match_row_key.as_deref().unwrap_or_default();
        let value = schema.match_row_value.clone().unwrap_or_default();
        out.push_str(&format!(
            "  {}: {} = {} ({} fields)\n",
            schema.description,
            key,
            value.to_string().bright_green(),
            schema.report_fields.len()
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_listing() {
        let output = format_output(&Registry::new(), &OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["data_schemas"][0]["description"], "data schema export_orders");
        assert_eq!(json["data_schemas"][1]["primary_keys"][1], "Lineitem name");
        assert_eq!(json["report_schemas"][1]["match_row_value"], "Zhen");
    }

    #[test]
    fn test_table_listing() {
        colored::control::set_override(false);
        let output = format_output(&Registry::new(), &OutputFormat::Table).unwrap();

        assert!(output.contains("data schema product_list (sheet 'Product list')"));
        assert!(output.contains("report schema mr Zhen: Vendor = Zhen (26 fields)"));
    }
}
