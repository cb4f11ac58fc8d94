//! 表格模型
//!
//! 三张工作表共用的行/单元格表示，写入 xlsx 前的最后一步。

use std::fmt::Display;

/// 工作表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    Objective,
    Subjective,
    Descriptive,
}

impl SheetKind {
    pub const ALL: [SheetKind; 3] = [
        SheetKind::Objective,
        SheetKind::Subjective,
        SheetKind::Descriptive,
    ];

    /// 工作表名称
    pub fn name(self) -> &'static str {
        match self {
            SheetKind::Objective => "Objective",
            SheetKind::Subjective => "Subjective",
            SheetKind::Descriptive => "Descriptive",
        }
    }
}

impl Display for SheetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 单元格
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn number(value: impl Into<f64>) -> Self {
        Cell::Number(value.into())
    }

    /// 可选数字，缺失时为空单元格
    pub fn opt_number(value: Option<u32>) -> Self {
        value.map(Cell::number).unwrap_or(Cell::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// 一张待写入的工作表
#[derive(Debug, Clone)]
pub struct SheetTable {
    pub kind: SheetKind,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetTable {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// 按列名取单元格
    pub fn cell(&self, row: usize, header: &str) -> Option<&Cell> {
        let col = self.headers.iter().position(|h| h == header)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }
}
