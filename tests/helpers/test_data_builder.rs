// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================
// 职责: 以链式调用拼装上传 CSV（列集合可控,单元格文本可控）
// ==========================================

#![allow(dead_code)]

use csv::Writer;
use dead_stock_analyzer::domain::schema::REQUIRED_COLUMNS;
use std::collections::HashMap;

// ==========================================
// 单行构建器
// ==========================================

pub struct InventoryRowBuilder {
    cells: HashMap<String, String>,
}

impl InventoryRowBuilder {
    /// 默认: Soap / Household / unit_cost 10 / current_stock 5
    pub fn new(sku: &str) -> Self {
        let mut cells = HashMap::new();
        cells.insert("sku".to_string(), sku.to_string());
        cells.insert("product_name".to_string(), "Soap".to_string());
        cells.insert("category".to_string(), "Household".to_string());
        cells.insert("unit_cost".to_string(), "10".to_string());
        cells.insert("current_stock".to_string(), "5".to_string());
        Self { cells }
    }

    pub fn product_name(self, name: &str) -> Self {
        self.cell("product_name", name)
    }

    pub fn category(self, category: &str) -> Self {
        self.cell("category", category)
    }

    pub fn unit_cost(self, cost: &str) -> Self {
        self.cell("unit_cost", cost)
    }

    pub fn current_stock(self, stock: &str) -> Self {
        self.cell("current_stock", stock)
    }

    pub fn initial_quantity(self, qty: &str) -> Self {
        self.cell("initial_quantity", qty)
    }

    pub fn stock_received_date(self, date: &str) -> Self {
        self.cell("stock_received_date", date)
    }

    pub fn last_sale_date(self, date: &str) -> Self {
        self.cell("last_sale_date", date)
    }

    /// 任意列
    pub fn cell(mut self, column: &str, value: &str) -> Self {
        self.cells.insert(column.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> HashMap<String, String> {
        self.cells
    }
}

// ==========================================
// 整表构建器
// ==========================================

pub struct UploadCsvBuilder {
    columns: Vec<String>,
    rows: Vec<HashMap<String, String>>,
}

impl UploadCsvBuilder {
    /// 指定列集合（顺序即表头顺序）
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// 仅含必需列
    pub fn required() -> Self {
        Self::new(REQUIRED_COLUMNS)
    }

    pub fn with_column(mut self, column: &str) -> Self {
        self.columns.push(column.to_string());
        self
    }

    pub fn row(mut self, row: InventoryRowBuilder) -> Self {
        self.rows.push(row.build());
        self
    }

    /// 生成 CSV 文本；行中没有的列输出空单元格
    pub fn build(self) -> String {
        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(&self.columns).unwrap();
        for row in &self.rows {
            let record: Vec<&str> = self
                .columns
                .iter()
                .map(|c| row.get(c).map(String::as_str).unwrap_or(""))
                .collect();
            writer.write_record(&record).unwrap();
        }
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    pub fn build_bytes(self) -> Vec<u8> {
        self.build().into_bytes()
    }
}
