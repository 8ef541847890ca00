// ==========================================
// 滞销库存分析系统 - 文件解析器实现
// ==========================================
// 阶段 0: 分隔文本读取与解析
// 红线: 单元格文本原样保留（回填列之外不改写任何字节）
// ==========================================

use crate::domain::inventory::InventoryTable;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::inventory_importer_trait::FileParser;
use csv::ReaderBuilder;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

// ==========================================
// CSV Parser 实现
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct CsvParser {
    delimiter: u8,
}

impl CsvParser {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// 指定分隔符（如 ';' 或 '\t'）
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

/// 读取上传文件内容（仅 .csv）
pub fn read_csv_file<P: AsRef<Path>>(file_path: P) -> ImportResult<Vec<u8>> {
    let path = file_path.as_ref();

    // 检查文件存在
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    // 检查扩展名
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if ext != "csv" {
        return Err(ImportError::UnsupportedFormat(ext));
    }

    Ok(std::fs::read(path)?)
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FileParser for CsvParser {
    fn parse_bytes(&self, content: &[u8]) -> ImportResult<InventoryTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true) // 行长度不足时补空,超出时报错
            .from_reader(content);

        // 读取表头（列名精确匹配,仅去除 UTF-8 BOM）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(idx, h)| {
                if idx == 0 {
                    h.trim_start_matches(UTF8_BOM).to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::ParseError("文件为空或缺少表头".to_string()));
        }

        let mut table = InventoryTable::new(headers);
        let width = table.columns().len();

        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;

            // 跳过完全空白的行
            if record.iter().all(|v| v.trim().is_empty()) {
                continue;
            }

            if record.len() > width {
                return Err(ImportError::ParseError(format!(
                    "行 {}: 字段数 {} 超出表头列数 {}",
                    row_idx + 1,
                    record.len(),
                    width
                )));
            }

            table.push_row(record.iter().map(str::to_string).collect());
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_csv_parser_valid_content() {
        let content = "sku,product_name,unit_cost\nA1,Soap,10\nA2,Salt,4.5\n";
        let table = CsvParser::new().parse_bytes(content.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "sku"), Some("A1"));
        assert_eq!(table.cell(1, "unit_cost"), Some("4.5"));
    }

    #[test]
    fn test_csv_parser_keeps_cell_text_verbatim() {
        let content = "sku,stock_value\nA1, 50.00 \n";
        let table = CsvParser::new().parse_bytes(content.as_bytes()).unwrap();
        assert_eq!(table.cell(0, "stock_value"), Some(" 50.00 "));
    }

    #[test]
    fn test_csv_parser_strips_bom_only() {
        let content = "\u{feff}sku,Category\nA1,Snacks\n";
        let table = CsvParser::new().parse_bytes(content.as_bytes()).unwrap();
        assert_eq!(table.columns(), &["sku".to_string(), "Category".to_string()]);
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let content = "sku,unit_cost\nA1,2.5\n,\nA2,3.0\n";
        let table = CsvParser::new().parse_bytes(content.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_csv_parser_pads_short_rows() {
        let content = "sku,unit_cost,current_stock\nA1,2.5\n";
        let table = CsvParser::new().parse_bytes(content.as_bytes()).unwrap();
        assert_eq!(table.cell(0, "current_stock"), Some(""));
    }

    #[test]
    fn test_csv_parser_rejects_long_rows() {
        let content = "sku,unit_cost\nA1,2.5,extra\n";
        let err = CsvParser::new().parse_bytes(content.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::ParseError(_)));
    }

    #[test]
    fn test_csv_parser_rejects_invalid_utf8() {
        let content: &[u8] = b"sku,unit_cost\n\xff\xfe,1\n";
        let err = CsvParser::new().parse_bytes(content).unwrap_err();
        assert!(matches!(err, ImportError::ParseError(_)));
    }

    #[test]
    fn test_csv_parser_rejects_empty_input() {
        let err = CsvParser::new().parse_bytes(b"").unwrap_err();
        assert!(matches!(err, ImportError::ParseError(_)));
    }

    #[test]
    fn test_csv_parser_semicolon_delimiter() {
        let content = "sku;unit_cost\nA1;2,5\n";
        let table = CsvParser::with_delimiter(b';')
            .parse_bytes(content.as_bytes())
            .unwrap();
        assert_eq!(table.cell(0, "unit_cost"), Some("2,5"));
    }

    #[test]
    fn test_read_csv_file_checks_existence_and_extension() {
        assert!(matches!(
            read_csv_file("non_existent.csv"),
            Err(ImportError::FileNotFound(_))
        ));

        let mut temp_file = Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(temp_file, "sku").unwrap();
        assert!(matches!(
            read_csv_file(temp_file.path()),
            Err(ImportError::UnsupportedFormat(_))
        ));
    }
}
