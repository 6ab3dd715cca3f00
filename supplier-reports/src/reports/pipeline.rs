//! Report generation pass over one workbook
//!
//! Orders are validated with post-processing, the product list is validated
//! and indexed on its primary keys, then every registered report schema is
//! projected over the orders. Any error aborts the whole pass.

use anyhow::{Context, Result};

use crate::reports::csv_report::{CsvReport, to_csv};
use crate::reports::errors::ErrorKind;
use crate::reports::lookup::LookupIndex;
use crate::reports::projector::ReportProjector;
use crate::reports::registry::Registry;
use crate::reports::source::RowSource;
use crate::reports::types::Table;
use crate::reports::validate::SchemaValidator;

/// Generate one entry per registered report schema, in registry order.
///
/// An entry is `None` when no order matched the schema.
pub fn generate_reports(
    source: &mut dyn RowSource,
    prefix: Option<&str>,
    registry: &Registry,
) -> Result<Vec<Option<CsvReport>>> {
    let orders = import_sheet(source, &registry.export_orders_sheet, registry, true)?;
    let products = import_sheet(source, &registry.product_list_sheet, registry, false)?;

    let key_columns = registry.product_list.primary_keys.as_deref().unwrap_or(&[]);
    let index = LookupIndex::build(&products, key_columns)
        .with_context(|| format!("Failed to index sheet: {}", registry.product_list_sheet))?;

    let mut reports = Vec::with_capacity(registry.reports().len());
    for schema in registry.reports() {
        log::info!("Processing data for report: {}", schema);

        let rows = ReportProjector::new(schema)
            .export_fields(&orders, Some(&index))
            .inspect_err(|e| {
                if e.kind() == ErrorKind::LookupKey {
                    log::error!("Unable to locate product list key: {}", e);
                }
            })
            .with_context(|| format!("Failed to build report: {}", schema))?;

        if rows.is_empty() {
            reports.push(None);
            continue;
        }

        let content = to_csv(&rows, &schema.report_fields)?;
        log::info!("Generated csv report for '{}' with {} rows", schema, rows.len());
        reports.push(Some(CsvReport::new(
            schema.clone(),
            content,
            prefix.map(str::to_string),
        )));
    }

    Ok(reports)
}

fn import_sheet(
    source: &mut dyn RowSource,
    sheet: &str,
    registry: &Registry,
    post_process: bool,
) -> Result<Table> {
    let schema = if post_process {
        &registry.export_orders
    } else {
        &registry.product_list
    };

    let rows = source.read_sheet(sheet)?;
    log::info!("Validating '{}'", sheet);

    let table = SchemaValidator::new(schema)
        .validate_table(&rows, post_process)
        .with_context(|| format!("Failed to validate sheet: {}", sheet))?;

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::errors::ReportError;
    use crate::reports::excel::XlsxSource;
    use crate::reports::source::MemorySource;
    use crate::reports::types::{Row, Schema, Value, row_from};
    use rust_xlsxwriter::Workbook;

    const ORDER_COLUMNS: [&str; 24] = [
        "Name",
        "Created at",
        "Fulfillment Status",
        "Vendor",
        "Lineitem name",
        "Lineitem sku",
        "Lineitem quantity",
        "Variant",
        "Size",
        "Color",
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
        "Phone",
        "Billing Phone",
        "Notes",
    ];

    /// Order line; `shipping` fills the shipping block of a first line
    fn order(name: &str, vendor: &str, item: &str, shipping: bool) -> Row {
        ORDER_COLUMNS
            .iter()
            .map(|col| {
                let value = match *col {
                    "Name" => Value::from(name),
                    "Vendor" => Value::from(vendor),
                    "Lineitem name" => Value::from(item),
                    "Lineitem quantity" => Value::Int(1),
                    "Phone" if shipping => Value::from("555-0100"),
                    "Shipping Phone" | "Billing Phone" => Value::Null,
                    c if shipping && (c.starts_with("Shipping") || c == "Notes") => {
                        Value::from(format!("{} of {}", c, name))
                    }
                    _ => Value::Null,
                };
                (col.to_string(), value)
            })
            .collect()
    }

    fn product(vendor: &str, item: &str) -> Row {
        row_from([
            ("Vendor", Value::from(format!("{}  ", vendor))),
            ("Lineitem name", Value::from(item)),
            ("Product link", Value::from(format!("https://shop.example/{}", item))),
        ])
    }

    fn source(orders: Vec<Row>) -> MemorySource {
        MemorySource::new()
            .with_sheet("Export orders", orders)
            .with_sheet(
                "Product list",
                vec![
                    product("Zhen", "Mug"),
                    product("Zhen", "Cup"),
                    product("Mr Art Painting store", "Sunset"),
                ],
            )
    }

    fn zhen_orders() -> Vec<Row> {
        vec![
            order("#1001", "Zhen", "Mug", true),
            order("#1001", "Zhen", "Cup", false),
        ]
    }

    #[test]
    fn test_generate_zhen_report() {
        let mut source = source(zhen_orders());
        let reports = generate_reports(&mut source, Some("orders_export"), &Registry::new()).unwrap();

        assert_eq!(reports.len(), 2);
        assert!(reports[0].is_none(), "no Mr Art Painting store orders");

        let zhen = reports[1].as_ref().unwrap();
        assert_eq!(zhen.file_name(), "orders_export-Zhen.csv");
        assert_eq!(zhen.row_count(), 2);

        let mut reader = csv::Reader::from_reader(zhen.content.as_bytes());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, zhen.schema.report_fields);

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        let col = |name: &str| headers.iter().position(|h| h == name).unwrap();

        assert_eq!(&records[0][col("Product link")], "https://shop.example/Mug");
        assert_eq!(&records[1][col("Product link")], "https://shop.example/Cup");
        // Second line inherits the order's shipping block and filled phone
        assert_eq!(&records[1][col("Shipping Name")], "Shipping Name of #1001");
        assert_eq!(&records[1][col("Shipping Phone")], "555-0100");
        assert_eq!(&records[1][col("Tracking Number")], "");
    }

    #[test]
    fn test_generate_both_vendors() {
        let mut orders = zhen_orders();
        orders.push(order("#1002", "Mr Art Painting store", "Sunset", true));

        let mut source = source(orders);
        let reports = generate_reports(&mut source, None, &Registry::new()).unwrap();

        let names: Vec<String> = reports.iter().flatten().map(CsvReport::file_name).collect();
        assert_eq!(names, vec!["Mr_Art_Painting_store.csv", "Zhen.csv"]);
        assert_eq!(reports[0].as_ref().unwrap().row_count(), 1);
    }

    #[test]
    fn test_unmatched_schema_yields_none() {
        let acme = Schema::new("report schema Acme")
            .with_match("Vendor", "Acme")
            .with_report_fields(["Name", "Product link"]);
        let registry = Registry::new().with_reports(vec![acme]);

        let mut source = source(zhen_orders());
        let reports = generate_reports(&mut source, None, &registry).unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].is_none());
    }

    #[test]
    fn test_missing_product_aborts() {
        let mut orders = zhen_orders();
        orders.push(order("#1003", "Zhen", "Plate", true));

        let mut source = source(orders);
        let err = generate_reports(&mut source, None, &Registry::new()).unwrap_err();

        let report_err = err.downcast_ref::<ReportError>().unwrap();
        assert_eq!(report_err.kind(), ErrorKind::LookupKey);
        assert_eq!(report_err.root(), &ReportError::LookupKey { key: "Zhen_Plate".into() });
        assert_eq!(report_err.row(), Some(3));
    }

    #[test]
    fn test_regrouped_order_aborts() {
        let orders = vec![
            order("#1001", "Zhen", "Mug", true),
            order("#1002", "Zhen", "Mug", true),
            order("#1001", "Zhen", "Cup", false),
        ];

        let mut source = source(orders);
        let err = generate_reports(&mut source, None, &Registry::new()).unwrap_err();
        let report_err = err.downcast_ref::<ReportError>().unwrap();
        assert_eq!(report_err.kind(), ErrorKind::Grouping);
        assert!(err.to_string().contains("Export orders"));
    }

    #[test]
    fn test_duplicate_product_aborts() {
        let mut source = MemorySource::new()
            .with_sheet("Export orders", zhen_orders())
            .with_sheet("Product list", vec![product("Zhen", "Mug"), product("Zhen", "Mug")]);

        let err = generate_reports(&mut source, None, &Registry::new()).unwrap_err();
        let report_err = err.downcast_ref::<ReportError>().unwrap();
        assert_eq!(report_err.kind(), ErrorKind::PrimaryKey);
        assert_eq!(report_err.row(), Some(2));
    }

    #[test]
    fn test_missing_sheet_aborts() {
        let mut source = MemorySource::new().with_sheet("Export orders", zhen_orders());

        let err = generate_reports(&mut source, None, &Registry::new()).unwrap_err();
        assert!(err.to_string().contains("no such sheet name Product list"));
    }

    #[test]
    fn test_generate_from_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders_export_02_14_2018.xlsx");

        let mut workbook = Workbook::new();
        let orders = workbook.add_worksheet();
        orders.set_name("Export orders").unwrap();
        for (row_idx, row) in zhen_orders().iter().enumerate() {
            for (col, (name, value)) in row.iter().enumerate() {
                if row_idx == 0 {
                    orders.write_string(0, col as u16, name).unwrap();
                }
                match value {
                    Value::Int(i) => {
                        orders.write_number(row_idx as u32 + 1, col as u16, *i as f64).unwrap();
                    }
                    Value::String(s) => {
                        orders.write_string(row_idx as u32 + 1, col as u16, s).unwrap();
                    }
                    _ => {}
                }
            }
        }

        let products = workbook.add_worksheet();
        products.set_name("Product list").unwrap();
        for (col, name) in ["Vendor", "Lineitem name", "Product link"].iter().enumerate() {
            products.write_string(0, col as u16, *name).unwrap();
        }
        for (row_idx, item) in ["Mug", "Cup"].iter().enumerate() {
            let row_idx = row_idx as u32 + 1;
            products.write_string(row_idx, 0, "Zhen").unwrap();
            products.write_string(row_idx, 1, *item).unwrap();
            products
                .write_string(row_idx, 2, format!("https://shop.example/{}", item))
                .unwrap();
        }
        workbook.save(&path).unwrap();

        let mut source = XlsxSource::open(&path).unwrap();
        let prefix = source.file_stem();
        let reports = generate_reports(&mut source, Some(&prefix), &Registry::new()).unwrap();

        let zhen = reports[1].as_ref().unwrap();
        assert_eq!(zhen.file_name(), "orders_export_02_14_2018-Zhen.csv");
        assert_eq!(zhen.row_count(), 2);
        assert!(zhen.content.contains("https://shop.example/Cup"));

        let saved = zhen.save(dir.path()).unwrap();
        assert!(saved.exists());
    }
}
