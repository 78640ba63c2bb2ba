use super::layout::{Block, GridTable, ReportDocument};
use crate::config::StyleConfig;

/// 同一行内横向合并的单元格区间（含两端）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMerge {
    pub row: usize,
    pub first_col: usize,
    pub last_col: usize,
}

impl CellMerge {
    pub fn span(&self) -> usize {
        self.last_col - self.first_col + 1
    }
}

/// 带样式的表格
#[derive(Debug, Clone, PartialEq)]
pub struct StyledTable {
    pub grid: GridTable,
    pub style_name: String,
    pub autofit: bool,
    /// 每列宽度（磅），`None` 表示不指定
    pub column_widths: Vec<Option<f32>>,
    pub merges: Vec<CellMerge>,
}

impl StyledTable {
    /// 以 (row, col) 开头的合并区间
    pub fn merge_at(&self, row: usize, col: usize) -> Option<&CellMerge> {
        self.merges
            .iter()
            .find(|m| m.row == row && m.first_col == col)
    }

    /// (row, col) 是否被前面的单元格合并掉
    pub fn is_covered(&self, row: usize, col: usize) -> bool {
        self.merges
            .iter()
            .any(|m| m.row == row && col > m.first_col && col <= m.last_col)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StyledBlock {
    Heading(String),
    Table(StyledTable),
    Paragraph(String),
}

/// 带样式的文档
#[derive(Debug, Clone, PartialEq)]
pub struct StyledDocument {
    pub font: String,
    /// 默认字号（磅），同时作用于东亚字体
    pub font_size: f32,
    pub blocks: Vec<StyledBlock>,
}

/// 给纯结构表格加上样式
///
/// - 表格样式与自动调整宽度
/// - 至少 4 列时设置第 3、4 列（Null、默认）的宽度
/// - 第 1、2 行的值单元格横向合并到最后一列
pub fn style_table(grid: GridTable, style: &StyleConfig) -> StyledTable {
    let column_count = grid.column_count;

    let mut column_widths = vec![None; column_count];
    if column_count >= 4 {
        column_widths[2] = Some(style.nullable_column_width);
        column_widths[3] = Some(style.default_column_width);
    }

    let mut merges = Vec::new();
    if column_count > 2 {
        for row in 0..grid.rows.len().min(2) {
            merges.push(CellMerge {
                row,
                first_col: 1,
                last_col: column_count - 1,
            });
        }
    }

    StyledTable {
        grid,
        style_name: style.table_style.clone(),
        autofit: true,
        column_widths,
        merges,
    }
}

/// 给整个文档加上默认字体，并为其中每个表格加样式
pub fn style_document(document: ReportDocument, style: &StyleConfig) -> StyledDocument {
    let blocks = document
        .blocks
        .into_iter()
        .map(|block| match block {
            Block::Heading(text) => StyledBlock::Heading(text),
            Block::Table(grid) => StyledBlock::Table(style_table(grid, style)),
            Block::Paragraph(text) => StyledBlock::Paragraph(text),
        })
        .collect();

    StyledDocument {
        font: style.font.clone(),
        font_size: style.font_size,
        blocks,
    }
}
