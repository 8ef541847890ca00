// ==========================================
// InventoryImporter 集成测试
// ==========================================
// 测试目标: 验证完整的上传流程（解析 → 校验 → 映射 → 回填）
// ==========================================

mod helpers;

use dead_stock_analyzer::domain::schema::{BACKFILL_COLUMNS, SIMULATED_COLUMNS};
use dead_stock_analyzer::export;
use dead_stock_analyzer::importer::{ImportError, InventoryImporter};
use dead_stock_analyzer::logging;
use dead_stock_analyzer::{InventorySimulator, InventoryTable};
use helpers::test_data_builder::{InventoryRowBuilder, UploadCsvBuilder};
use test_helpers::{cell, reference_date, write_temp_csv};

fn importer() -> InventoryImporter {
    InventoryImporter::default()
}

#[test]
fn test_soap_row_is_backfilled_with_defaults() {
    logging::init_test();

    let csv = UploadCsvBuilder::required()
        .row(InventoryRowBuilder::new("A1"))
        .build();
    let outcome = importer()
        .import_bytes(csv.as_bytes(), reference_date())
        .expect("导入应成功");
    let table = &outcome.table;

    assert_eq!(cell(table, 0, "stock_value"), "50");
    assert_eq!(cell(table, 0, "days_since_last_sale"), "0");
    assert_eq!(cell(table, 0, "stock_status"), "Active (< 1 month)");
    assert_eq!(cell(table, 0, "urgency_score"), "50");
    assert_eq!(cell(table, 0, "holding_cost"), "0");
    assert_eq!(cell(table, 0, "action_required"), "Review");
    assert_eq!(cell(table, 0, "monthly_velocity"), "0");

    // 回填列按固定顺序追加在原列之后
    let appended: Vec<&str> = table.columns()[5..].iter().map(String::as_str).collect();
    assert_eq!(appended, BACKFILL_COLUMNS.to_vec());

    let stock_value = outcome.report.column("stock_value").unwrap();
    assert_eq!((stock_value.derived, stock_value.defaulted), (1, 0));
    let urgency = outcome.report.column("urgency_score").unwrap();
    assert_eq!((urgency.derived, urgency.defaulted), (0, 1));
}

#[test]
fn test_missing_unit_cost_lists_exactly_that_column() {
    let csv = UploadCsvBuilder::new(&["sku", "product_name", "category", "current_stock"])
        .row(InventoryRowBuilder::new("A1"))
        .build();
    let err = importer()
        .import_bytes(csv.as_bytes(), reference_date())
        .unwrap_err();

    match err {
        ImportError::SchemaError { missing } => assert_eq!(missing, vec!["unit_cost"]),
        other => panic!("期望 SchemaError, 实际 {:?}", other),
    }
}

#[test]
fn test_column_names_are_case_sensitive() {
    let csv = "SKU,product_name,category,unit_cost,current_stock\nA1,Soap,Household,10,5\n";
    let err = importer()
        .import_bytes(csv.as_bytes(), reference_date())
        .unwrap_err();
    assert!(err.to_string().contains("sku"));
}

#[test]
fn test_fully_derived_table_is_unchanged() {
    let records = InventorySimulator::default().generate_at(120, 42, reference_date());
    let original = InventoryTable::from_records(&records);

    let mut bytes = Vec::new();
    export::write_csv(&original, &mut bytes).unwrap();

    let outcome = importer()
        .import_bytes(&bytes, reference_date())
        .expect("模拟表应可直接导入");

    assert!(outcome.report.is_empty(), "不应回填任何列");
    assert_eq!(outcome.table, original);
}

#[test]
fn test_supplied_cells_are_kept_verbatim() {
    let columns = [
        "sku",
        "product_name",
        "category",
        "unit_cost",
        "current_stock",
        "stock_value",
        "days_since_last_sale",
        "stock_status",
        "urgency_score",
        "holding_cost",
        "action_required",
        "monthly_velocity",
    ];
    let csv = UploadCsvBuilder::new(&columns)
        .row(
            InventoryRowBuilder::new("A1")
                .cell("stock_value", "50.00")
                .cell("days_since_last_sale", " 7 ")
                .cell("stock_status", "Active")
                .cell("urgency_score", "12.50")
                .cell("holding_cost", "0.0")
                .cell("action_required", "Keep on shelf")
                .cell("monthly_velocity", "3.333"),
        )
        .build();

    let outcome = importer()
        .import_bytes(csv.as_bytes(), reference_date())
        .unwrap();
    let table = &outcome.table;

    assert_eq!(table.columns().len(), columns.len());
    assert_eq!(cell(table, 0, "stock_value"), "50.00");
    assert_eq!(cell(table, 0, "days_since_last_sale"), " 7 ");
    assert_eq!(cell(table, 0, "stock_status"), "Active");
    assert_eq!(cell(table, 0, "urgency_score"), "12.50");
    assert_eq!(cell(table, 0, "action_required"), "Keep on shelf");
}

#[test]
fn test_last_sale_date_enables_full_classification() {
    let csv = UploadCsvBuilder::required()
        .with_column("last_sale_date")
        .with_column("stock_received_date")
        .with_column("initial_quantity")
        .row(
            InventoryRowBuilder::new("A1")
                .current_stock("60")
                .last_sale_date("2025-12-01")
                .stock_received_date("2025-11-01")
                .initial_quantity("80"),
        )
        .row(
            InventoryRowBuilder::new("A2")
                .product_name("Salt 1kg")
                .category("Groceries")
                .last_sale_date("2026-06-20")
                .stock_received_date("2026-05-31")
                .initial_quantity("5"),
        )
        .build();

    let outcome = importer()
        .import_bytes(csv.as_bytes(), reference_date())
        .unwrap();
    let table = &outcome.table;

    assert_eq!(cell(table, 0, "days_since_last_sale"), "211");
    assert_eq!(cell(table, 0, "stock_status"), "Dead Stock (6+ months)");
    assert_eq!(cell(table, 0, "action_required"), "Clearance Sale / Bundle");
    // Household 月费率 0.008 × 241 天: 600 × 0.008 × 241 / 30 = 38.56
    assert_eq!(cell(table, 0, "holding_cost"), "38.56");
    // 40 + 30 (库存金额 600) + 20 (持有成本 38.56)
    assert_eq!(cell(table, 0, "urgency_score"), "90");

    assert_eq!(cell(table, 1, "days_since_last_sale"), "10");
    assert_eq!(cell(table, 1, "stock_status"), "Active (< 1 month)");
    assert_eq!(cell(table, 1, "action_required"), "Restock When Low");
    assert_eq!(cell(table, 1, "monthly_velocity"), "0");

    let velocity = outcome.report.column("monthly_velocity").unwrap();
    assert_eq!(velocity.derived, 2);
}

#[test]
fn test_unparseable_formula_input_fails_whole_import() {
    let csv = UploadCsvBuilder::required()
        .row(InventoryRowBuilder::new("A1"))
        .row(InventoryRowBuilder::new("A2").unit_cost("ten"))
        .build();
    let err = importer()
        .import_bytes(csv.as_bytes(), reference_date())
        .unwrap_err();

    assert!(matches!(err, ImportError::ParseError(_)));
    let message = err.to_string();
    assert!(message.contains("行 2"), "{}", message);
    assert!(message.contains("unit_cost"), "{}", message);
}

#[test]
fn test_unparseable_last_sale_date_fails() {
    let csv = UploadCsvBuilder::required()
        .with_column("last_sale_date")
        .row(InventoryRowBuilder::new("A1").last_sale_date("last week"))
        .build();
    let err = importer()
        .import_bytes(csv.as_bytes(), reference_date())
        .unwrap_err();
    assert!(err.to_string().contains("last_sale_date"));
}

#[test]
fn test_days_in_stock_column_drives_holding_and_velocity() {
    let csv = UploadCsvBuilder::required()
        .with_column("initial_quantity")
        .with_column("days_in_stock")
        .row(
            InventoryRowBuilder::new("A1")
                .initial_quantity("35")
                .cell("days_in_stock", "120"),
        )
        .build();
    let outcome = importer()
        .import_bytes(csv.as_bytes(), reference_date())
        .unwrap();

    // 售出 30 件 / 120 天 × 30
    assert_eq!(cell(&outcome.table, 0, "monthly_velocity"), "7.5");
    // 5 × 10 × 0.008 × 120 / 30
    assert_eq!(cell(&outcome.table, 0, "holding_cost"), "1.6");
    assert_eq!(outcome.report.column("holding_cost").unwrap().derived, 1);
}

#[test]
fn test_unparseable_days_in_stock_fails() {
    let csv = UploadCsvBuilder::required()
        .with_column("days_in_stock")
        .row(InventoryRowBuilder::new("A1").cell("days_in_stock", "n/a"))
        .build();
    let err = importer()
        .import_bytes(csv.as_bytes(), reference_date())
        .unwrap_err();

    assert!(matches!(err, ImportError::ParseError(_)));
    assert!(err.to_string().contains("days_in_stock"));
}

#[test]
fn test_display_only_columns_do_not_block_import() {
    let csv = UploadCsvBuilder::required()
        .with_column("unit_price")
        .with_column("supplier")
        .row(
            InventoryRowBuilder::new("A1")
                .cell("unit_price", "n/a")
                .cell("supplier", "Choppies"),
        )
        .build();
    let outcome = importer()
        .import_bytes(csv.as_bytes(), reference_date())
        .unwrap();

    assert_eq!(cell(&outcome.table, 0, "unit_price"), "n/a");
    assert_eq!(outcome.table.columns()[6], "supplier");
}

#[test]
fn test_non_csv_content_is_parse_error() {
    let err = importer()
        .import_bytes(b"\xff\xfe\x00garbage", reference_date())
        .unwrap_err();
    assert!(err.is_user_correctable());
}

#[test]
fn test_import_from_path() {
    let csv = UploadCsvBuilder::required()
        .row(InventoryRowBuilder::new("A1"))
        .row(InventoryRowBuilder::new("A2").current_stock("0"))
        .build();
    let file = write_temp_csv(&csv);

    let outcome = importer()
        .import_from_path(file.path(), reference_date())
        .unwrap();
    assert_eq!(outcome.table.len(), 2);
    assert_eq!(cell(&outcome.table, 1, "stock_value"), "0");

    let err = importer()
        .import_from_path("does/not/exist.csv", reference_date())
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}

#[test]
fn test_simulated_columns_cover_backfill_columns() {
    for column in BACKFILL_COLUMNS {
        assert!(SIMULATED_COLUMNS.contains(column), "{}", column);
    }
}
