// ==========================================
// 滞销库存分析系统 - 库存表导出
// ==========================================
// 职责: InventoryTable → CSV / JSON 记录数组
// 说明: CSV 原样输出单元格;JSON 按列类型输出数值,无法解析的保留文本
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::inventory::InventoryTable;
use crate::domain::schema::{column_kind, ColumnKind};
use serde_json::{Map, Number, Value};
use std::io::Write;

/// 写出 CSV（表头 + 全部行）
pub fn write_csv<W: Write>(table: &InventoryTable, writer: W) -> ApiResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.columns())?;
    for row in table.rows() {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// 转为 JSON 记录数组（每行一个对象,键为列名）
pub fn to_json_records(table: &InventoryTable) -> Vec<Value> {
    table
        .rows()
        .iter()
        .map(|row| {
            let mut object = Map::new();
            for (column, cell) in table.columns().iter().zip(row) {
                object.insert(column.clone(), typed_value(column_kind(column), cell));
            }
            Value::Object(object)
        })
        .collect()
}

/// 写出 JSON 记录数组
pub fn write_json<W: Write>(table: &InventoryTable, writer: W) -> ApiResult<()> {
    serde_json::to_writer_pretty(writer, &to_json_records(table))?;
    Ok(())
}

fn typed_value(kind: ColumnKind, cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }

    match kind {
        ColumnKind::Integer => trimmed
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(cell.to_string())),
        ColumnKind::Decimal => trimmed
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(cell.to_string())),
        ColumnKind::Text | ColumnKind::Date => Value::String(cell.to_string()),
    }
}
