// ==========================================
// 滞销库存分析系统 - 字段映射器实现
// ==========================================
// 职责: 单行文本 → RawInventoryRecord + 类型转换
// 规则: 空单元格视为缺失;回填公式读取的列转换失败即报错,
//       其余展示列转换失败只记日志并视为缺失
// ==========================================

use crate::domain::inventory::RawInventoryRecord;
use crate::domain::schema::columns;
use crate::domain::types::StockStatus;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::inventory_importer_trait::FieldMapper as FieldMapperTrait;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawInventoryRecord> {
        Ok(RawInventoryRecord {
            // 标识
            sku: self.get_string(row, columns::SKU),
            product_name: self.get_string(row, columns::PRODUCT_NAME),
            category: self.get_string(row, columns::CATEGORY),
            variant: self.get_string(row, columns::VARIANT),

            // 公式输入（严格）
            unit_cost: self.parse_f64(row, columns::UNIT_COST, row_number)?,
            initial_quantity: self.parse_quantity(row, columns::INITIAL_QUANTITY, row_number)?,
            current_stock: self.parse_quantity(row, columns::CURRENT_STOCK, row_number)?,
            stock_received_date: self.parse_date(row, columns::STOCK_RECEIVED_DATE, row_number)?,
            last_sale_date: self.parse_date(row, columns::LAST_SALE_DATE, row_number)?,
            days_since_last_sale: self.parse_quantity(
                row,
                columns::DAYS_SINCE_LAST_SALE,
                row_number,
            )?,
            days_in_stock: self.parse_quantity(row, columns::DAYS_IN_STOCK, row_number)?,
            stock_value: self.parse_f64(row, columns::STOCK_VALUE, row_number)?,
            holding_cost: self.parse_f64(row, columns::HOLDING_COST, row_number)?,

            // 展示列（宽松）
            unit_price: self.lenient(self.parse_f64(row, columns::UNIT_PRICE, row_number)),
            monthly_velocity: self
                .lenient(self.parse_f64(row, columns::MONTHLY_VELOCITY, row_number)),
            urgency_score: self.lenient(self.parse_f64(row, columns::URGENCY_SCORE, row_number)),
            stock_status: self
                .get_string(row, columns::STOCK_STATUS)
                .and_then(|s| s.parse::<StockStatus>().ok()),
            action_required: self.get_string(row, columns::ACTION_REQUIRED),

            // 元信息
            row_number,
        })
    }
}

impl FieldMapper {
    /// 提取字符串字段（去首尾空白,空值返回 None）
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        row.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// 宽松转换：失败记日志并视为缺失
    fn lenient<T>(&self, result: ImportResult<Option<T>>) -> Option<T> {
        match result {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "展示列转换失败，按缺失处理");
                None
            }
        }
    }

    /// 解析浮点数
    fn parse_f64(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => match value.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Some(v)),
                _ => Err(ImportError::cell(
                    row_number,
                    key,
                    format!("无法解析为数值: {}", value),
                )),
            },
        }
    }

    /// 解析整数（接受 "5" 与 "5.0",拒绝带小数部分的值）
    fn parse_quantity(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<i64>> {
        let value = match self.get_string(row, key) {
            None => return Ok(None),
            Some(v) => v,
        };

        if let Ok(v) = value.parse::<i64>() {
            return Ok(Some(v));
        }

        match value.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(Some(v as i64)),
            _ => Err(ImportError::cell(
                row_number,
                key,
                format!("无法解析为整数: {}", value),
            )),
        }
    }

    /// 解析日期（YYYY-MM-DD / YYYY/MM/DD / YYYYMMDD / 带时间）
    fn parse_date(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<NaiveDate>> {
        let value = match self.get_string(row, key) {
            None => return Ok(None),
            Some(v) => v,
        };

        NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&value, "%Y/%m/%d"))
            .or_else(|_| NaiveDate::parse_from_str(&value, "%Y%m%d"))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(&value, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date())
            })
            .map(Some)
            .map_err(|_| {
                ImportError::cell(row_number, key, format!("日期格式错误: {}", value))
            })
    }
}
