// ==========================================
// 测试数据生成器
// ==========================================
// 用途: 生成上传样例 CSV 文件
// 输出: tests/fixtures/datasets/*.csv
// ==========================================

use chrono::NaiveDate;
use csv::Writer;
use dead_stock_analyzer::domain::schema::REQUIRED_COLUMNS;
use dead_stock_analyzer::export;
use dead_stock_analyzer::InventorySimulator;
use std::error::Error;
use std::fs::{self, File};

const OUTPUT_DIR: &str = "tests/fixtures/datasets";
const SEED: u64 = 42;

// 小店常见商品 (sku, 名称, 品类, 进价, 现有库存)
const SHOP_ITEMS: &[(&str, &str, &str, &str, &str)] = &[
    ("SPZ-GRO-0001", "Maize Meal 10kg (Tastic)", "Groceries", "89.50", "14"),
    ("SPZ-GRO-0002", "Sugar 2kg (Huletts)", "Groceries", "38.00", "22"),
    ("SPZ-BEV-0003", "Coke 2L (Coca-Cola)", "Beverages", "21.00", "36"),
    ("SPZ-HOU-0004", "Sunlight Soap (Unilever)", "Household", "12.50", "40"),
    ("SPZ-PER-0005", "Vaseline 250ml (Unilever)", "Personal Care", "34.99", "9"),
    ("SPZ-SNA-0006", "Simba Chips 125g (Simba)", "Snacks", "15.00", "0"),
];

// 对应最近销售日期（相对基准日 2026-06-30 分别为 3 / 45 / 100 / 240 / 12 / 75 天）
const LAST_SALE_DATES: &[&str] = &[
    "2026-06-27",
    "2026-05-16",
    "2026-03-22",
    "2025-11-02",
    "2026-06-18",
    "2026-04-16",
];

fn main() -> Result<(), Box<dyn Error>> {
    println!("开始生成测试数据集...");
    fs::create_dir_all(OUTPUT_DIR)?;

    generate_minimal_required()?;
    generate_full_simulated()?;
    generate_missing_unit_cost()?;
    generate_bad_unit_cost()?;
    generate_with_last_sale_date()?;

    println!("✓ 所有测试数据集生成完成！");
    Ok(())
}

fn create_writer(name: &str) -> Result<Writer<File>, Box<dyn Error>> {
    let file = File::create(format!("{}/{}", OUTPUT_DIR, name))?;
    Ok(Writer::from_writer(file))
}

// 01: 仅必需列
fn generate_minimal_required() -> Result<(), Box<dyn Error>> {
    let mut wtr = create_writer("01_minimal_required.csv")?;
    wtr.write_record(REQUIRED_COLUMNS)?;
    for (sku, name, category, cost, stock) in SHOP_ITEMS {
        wtr.write_record([sku, name, category, cost, stock])?;
    }
    wtr.flush()?;
    println!("✓ 生成 01_minimal_required.csv ({}条)", SHOP_ITEMS.len());
    Ok(())
}

// 02: 模拟器完整输出（导入后应原样保留）
fn generate_full_simulated() -> Result<(), Box<dyn Error>> {
    let reference = NaiveDate::from_ymd_opt(2026, 6, 30).ok_or("基准日非法")?;
    let records = InventorySimulator::default().generate_at(120, SEED, reference);
    let table = dead_stock_analyzer::InventoryTable::from_records(&records);

    let file = File::create(format!("{}/02_full_simulated.csv", OUTPUT_DIR))?;
    export::write_csv(&table, file)?;
    println!("✓ 生成 02_full_simulated.csv ({}条)", table.len());
    Ok(())
}

// 03: 缺少 unit_cost 列（应报 SchemaError）
fn generate_missing_unit_cost() -> Result<(), Box<dyn Error>> {
    let mut wtr = create_writer("03_missing_unit_cost.csv")?;
    wtr.write_record(["sku", "product_name", "category", "current_stock"])?;
    for (sku, name, category, _, stock) in SHOP_ITEMS {
        wtr.write_record([sku, name, category, stock])?;
    }
    wtr.flush()?;
    println!("✓ 生成 03_missing_unit_cost.csv ({}条，缺少 unit_cost 列)", SHOP_ITEMS.len());
    Ok(())
}

// 04: unit_cost 非数字（应报 ParseError）
fn generate_bad_unit_cost() -> Result<(), Box<dyn Error>> {
    let mut wtr = create_writer("04_bad_unit_cost.csv")?;
    wtr.write_record(REQUIRED_COLUMNS)?;
    for (i, (sku, name, category, cost, stock)) in SHOP_ITEMS.iter().enumerate() {
        let cost = if i == 2 { "twenty-one" } else { *cost };
        wtr.write_record([*sku, *name, *category, cost, *stock])?;
    }
    wtr.flush()?;
    println!("✓ 生成 04_bad_unit_cost.csv ({}条，第3行进价非法)", SHOP_ITEMS.len());
    Ok(())
}

// 05: 带最近销售日期（可完整分级）
fn generate_with_last_sale_date() -> Result<(), Box<dyn Error>> {
    let mut wtr = create_writer("05_with_last_sale_date.csv")?;
    let mut header = REQUIRED_COLUMNS.to_vec();
    header.push("last_sale_date");
    wtr.write_record(&header)?;

    for ((sku, name, category, cost, stock), last_sale) in
        SHOP_ITEMS.iter().zip(LAST_SALE_DATES)
    {
        wtr.write_record([sku, name, category, cost, stock, last_sale])?;
    }
    wtr.flush()?;
    println!("✓ 生成 05_with_last_sale_date.csv ({}条)", SHOP_ITEMS.len());
    Ok(())
}
