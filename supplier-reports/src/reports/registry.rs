//! Built-in schemas and the ordered report registry

use crate::reports::types::{FillGrouped, FillMissing, Schema};

pub const PRODUCT_LIST_SHEET: &str = "Product list";
pub const EXPORT_ORDERS_SHEET: &str = "Export orders";

/// Product list: one row per (vendor, item), each with a product link
pub fn product_list_schema() -> Schema {
    Schema::new("data schema product_list")
        .with_primary_keys(["Vendor", "Lineitem name"])
        .with_not_empty(["Product link"])
}

/// Order export: shipping details only on the first line of each order
pub fn export_orders_schema() -> Schema {
    Schema::new("data schema export_orders")
        .with_fill_missing(vec![FillMissing::new(
            "Shipping Phone",
            ["Phone", "Billing Phone"],
        )])
        .with_fill_grouped(FillGrouped::new(
            "Name",
            [
                "Shipping Name",
                "Shipping Street",
                "Shipping Address1",
                "Shipping Address2",
                "Shipping Company",
                "Shipping City",
                "Shipping Zip",
                "Shipping Province",
                "Shipping Country",
                "Shipping Phone",
                "Notes",
            ],
        ))
}

pub fn mr_art_painting_schema() -> Schema {
    Schema::new("report schema Mr art Painting store")
        .with_match("Vendor", "Mr Art Painting store")
        .with_report_fields([
            "Name",
            "Lineitem name",
            "Variant",
            "Lineitem quantity",
            "Product link",
            "Size",
            "Frame option",
            "Shipping Name",
            "Shipping Street",
            "Shipping Address1",
            "Shipping Address2",
            "Shipping Company",
            "Shipping City",
            "Shipping Zip",
            "Shipping Province",
            "Shipping Country",
            "Shipping Phone",
        ])
}

pub fn zhen_schema() -> Schema {
    Schema::new("report schema mr Zhen")
        .with_match("Vendor", "Zhen")
        .with_report_fields([
            "Name",
            "Lineitem name",
            "Created at",
            "Financial status",
            "Fulfillment Status",
            "Internal note",
            "Marketplace",
            "Supplier",
            "Product link",
            "Lineitem sku",
            "Variant",
            "Size",
            "Color",
            "Lineitem quantity",
            "Price",
            "Shipping Name",
            "Shipping Street",
            "Shipping Address1",
            "Tracking Number",
            "Shipping Address2",
            "Shipping Company",
            "Shipping City",
            "Shipping Zip",
            "Shipping Province",
            "Shipping Country",
            "Shipping Phone",
        ])
        .with_new_fields([
            "Financial status",
            "Internal note",
            "Marketplace",
            "Supplier",
            "Tracking Number",
            "Price",
        ])
}

/// Data schemas, sheet names and report schemas for one generation pass.
///
/// Report schemas are processed in registration order.
#[derive(Debug, Clone)]
pub struct Registry {
    pub product_list: Schema,
    pub export_orders: Schema,
    pub product_list_sheet: String,
    pub export_orders_sheet: String,
    reports: Vec<Schema>,
}

impl Default for Registry {
    fn default() -> Self {
        Registry {
            product_list: product_list_schema(),
            export_orders: export_orders_schema(),
            product_list_sheet: PRODUCT_LIST_SHEET.to_string(),
            export_orders_sheet: EXPORT_ORDERS_SHEET.to_string(),
            reports: vec![mr_art_painting_schema(), zhen_schema()],
        }
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the built-in report schemas
    pub fn with_reports(mut self, reports: Vec<Schema>) -> Self {
        self.reports = reports;
        self
    }

    pub fn with_sheets(mut self, product_list: impl Into<String>, export_orders: impl Into<String>) -> Self {
        self.product_list_sheet = product_list.into();
        self.export_orders_sheet = export_orders.into();
        self
    }

    pub fn reports(&self) -> &[Schema] {
        &self.reports
    }

    /// Data schemas in processing order
    pub fn data_schemas(&self) -> [&Schema; 2] {
        [&self.export_orders, &self.product_list]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::types::Value;

    #[test]
    fn test_default_registry_order() {
        let registry = Registry::new();
        let values: Vec<_> = registry
            .reports()
            .iter()
            .map(|s| s.match_row_value.clone().unwrap_or_default())
            .collect();
        assert_eq!(values, vec![Value::from("Mr Art Painting store"), Value::from("Zhen")]);
        assert_eq!(registry.product_list_sheet, "Product list");
        assert_eq!(registry.export_orders_sheet, "Export orders");
    }

    #[test]
    fn test_report_schemas_are_reports() {
        let registry = Registry::new();
        assert!(registry.reports().iter().all(Schema::is_report));
        assert!(registry.data_schemas().iter().all(|s| !s.is_report()));
    }

    #[test]
    fn test_zhen_new_fields_are_report_fields() {
        let schema = zhen_schema();
        assert_eq!(schema.new_fields().len(), 6);
        assert!(schema
            .new_fields()
            .iter()
            .all(|f| schema.report_fields.contains(f)));
    }

    #[test]
    fn test_with_reports_replaces_builtins() {
        let custom = Schema::new("report schema Acme").with_match("Vendor", "Acme").with_report_fields(["Name"]);
        let registry = Registry::new().with_reports(vec![custom.clone()]);
        assert_eq!(registry.reports(), [custom]);
    }
}
