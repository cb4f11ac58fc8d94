//! 工作簿写入 - 业务能力层
//!
//! 把三张 [`SheetTable`] 写成一个 xlsx 文件，第一行为加粗表头。

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use tracing::{debug, warn};

use crate::models::{Cell, SheetTable};

/// Excel 单元格可容纳的最大字符数
pub const MAX_CELL_CHARS: usize = 32_767;

/// 超过单元格上限时按字符边界截断，未超过返回 `None`
pub fn clamp_cell_text(value: &str) -> Option<&str> {
    value
        .char_indices()
        .nth(MAX_CELL_CHARS)
        .map(|(idx, _)| &value[..idx])
}

/// 生成工作簿
pub fn build_workbook(tables: &[SheetTable]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for table in tables {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(table.name())
            .with_context(|| format!("无法设置工作表名称: {}", table.name()))?;

        for (col, header) in table.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let xlsx_row = (row_idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Text(value) => {
                        let text = match clamp_cell_text(value) {
                            Some(truncated) => {
                                warn!(
                                    "⚠️ 工作表 {} 第 {} 行 {} 列超过 {} 字符，已截断",
                                    table.name(),
                                    xlsx_row + 1,
                                    table.headers.get(col).map(String::as_str).unwrap_or_default(),
                                    MAX_CELL_CHARS
                                );
                                truncated
                            }
                            None => value.as_str(),
                        };
                        worksheet.write_string(xlsx_row, col as u16, text)?;
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(xlsx_row, col as u16, *value)?;
                    }
                    Cell::Empty => {}
                }
            }
        }

        debug!("工作表 {} 写入 {} 行", table.name(), table.rows.len());
    }

    Ok(workbook)
}

/// 生成 xlsx 字节
pub fn render_to_bytes(tables: &[SheetTable]) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(tables)?;
    workbook.save_to_buffer().context("无法生成 xlsx 内容")
}

/// 写入 xlsx 文件
pub fn save_to_path(tables: &[SheetTable], path: &Path) -> Result<()> {
    let mut workbook = build_workbook(tables)?;
    workbook
        .save(path)
        .with_context(|| format!("无法写入工作簿: {}", path.display()))
}
