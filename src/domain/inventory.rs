// ==========================================
// 滞销库存分析系统 - 库存领域模型
// ==========================================
// 职责: 库存记录 / 导入中间结构 / 交付给展示层的库存表
// 生命周期: 一次加载生成整表,之后只读;新加载整表替换
// ==========================================

use crate::domain::schema::SIMULATED_COLUMNS;
use crate::domain::types::{MovementClass, StockStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// InventoryRecord - 完整库存记录
// ==========================================
// 用途: 模拟器输出,分级引擎补全分级字段
// 红线: current_stock ∈ [0, initial_quantity]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    // ===== 标识 =====
    pub sku: String,
    pub product_name: String,
    pub category: String,
    pub variant: String,

    // ===== 价格 =====
    pub unit_cost: f64,
    pub unit_price: f64,
    pub profit_margin_pct: f64,

    // ===== 数量 =====
    pub initial_quantity: u32,
    pub current_stock: u32,
    pub total_sold: u32,

    // ===== 时间 =====
    pub stock_received_date: NaiveDate,
    pub last_sale_date: NaiveDate,
    pub days_since_last_sale: i64,
    pub days_in_stock: i64,

    // ===== 派生财务指标 =====
    pub monthly_velocity: f64,
    pub stock_value: f64,
    pub potential_revenue: f64,
    pub holding_cost: f64,

    // ===== 模拟标签 =====
    pub movement_category: MovementClass,

    // ===== 分级结果（分级引擎写入）=====
    pub stock_status: StockStatus,
    pub urgency_score: f64,
    pub action_required: String,
}

impl InventoryRecord {
    /// 按 SIMULATED_COLUMNS 顺序输出单元格文本
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.sku.clone(),
            self.product_name.clone(),
            self.category.clone(),
            self.variant.clone(),
            format_decimal(self.unit_cost),
            format_decimal(self.unit_price),
            format_decimal(self.profit_margin_pct),
            self.initial_quantity.to_string(),
            self.current_stock.to_string(),
            self.total_sold.to_string(),
            format_date(self.stock_received_date),
            format_date(self.last_sale_date),
            self.days_since_last_sale.to_string(),
            self.days_in_stock.to_string(),
            format_decimal(self.monthly_velocity),
            format_decimal(self.stock_value),
            format_decimal(self.potential_revenue),
            format_decimal(self.holding_cost),
            self.movement_category.to_string(),
            self.stock_status.to_string(),
            format_decimal(self.urgency_score),
            self.action_required.clone(),
        ]
    }
}

// ==========================================
// RawInventoryRecord - 导入中间结构体
// ==========================================
// 用途: 库存表单行的类型化视图（字段映射 → 此结构）
// 说明: 所有字段可缺省,缺省即该列不存在或单元格为空
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInventoryRecord {
    pub sku: Option<String>,
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub variant: Option<String>,
    pub unit_cost: Option<f64>,
    pub unit_price: Option<f64>,
    pub initial_quantity: Option<i64>,
    pub current_stock: Option<i64>,
    pub stock_received_date: Option<NaiveDate>,
    pub last_sale_date: Option<NaiveDate>,
    pub days_since_last_sale: Option<i64>,
    pub days_in_stock: Option<i64>,
    pub monthly_velocity: Option<f64>,
    pub stock_value: Option<f64>,
    pub holding_cost: Option<f64>,
    pub stock_status: Option<StockStatus>,
    pub urgency_score: Option<f64>,
    pub action_required: Option<String>,

    // 元信息（1 起始,不含表头）
    pub row_number: usize,
}

// ==========================================
// InventoryTable - 库存表
// ==========================================
// 用途: 交付给展示层的整表（列名 + 文本单元格）
// 红线: 用户上传的单元格文本原样保留
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl InventoryTable {
    /// 创建空表
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// 由列名与行数据组装；行长度不足补空,超出截断
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// 由模拟记录生成完整表
    pub fn from_records(records: &[InventoryRecord]) -> Self {
        Self {
            columns: SIMULATED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: records.iter().map(InventoryRecord::to_row).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// 读取单元格文本
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx)).map(String::as_str)
    }

    /// 追加一行；长度按列数对齐
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    /// 追加一列
    ///
    /// # 返回
    /// - true: 已追加
    /// - false: 列已存在或行数不一致（不覆盖已有列）
    pub fn append_column(&mut self, name: &str, values: Vec<String>) -> bool {
        if self.has_column(name) || values.len() != self.rows.len() {
            return false;
        }
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        true
    }

    /// 单行转为 列名 → 文本 映射（供字段映射器使用）
    pub fn row_map(&self, row: usize) -> HashMap<String, String> {
        let mut map = HashMap::new();
        if let Some(cells) = self.rows.get(row) {
            for (column, value) in self.columns.iter().zip(cells) {
                map.insert(column.clone(), value.clone());
            }
        }
        map
    }
}

/// 小数格式化（最短表示,整数值不带小数点）
pub fn format_decimal(value: f64) -> String {
    value.to_string()
}

/// 日期格式化（YYYY-MM-DD）
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
