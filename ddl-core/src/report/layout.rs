use crate::config::ReportConfig;
use crate::constants::report::{FIELD_COLUMN_COUNT, HEADER_ROW_COUNT};
use crate::ddl::TableRecord;

/// 缺省值处理: `None` 或空字符串都显示为占位符
pub fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => placeholder,
    }
}

/// 纯结构的表格，不含任何样式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTable {
    pub column_count: usize,
    pub rows: Vec<Vec<String>>,
}

impl GridTable {
    /// 创建 rows × cols 的空表格
    pub fn new(row_count: usize, column_count: usize) -> Self {
        Self {
            column_count,
            rows: vec![vec![String::new(); column_count]; row_count],
        }
    }

    /// 从第 0 列开始依次填充一行，超出列数的内容被忽略
    pub fn fill_row(&mut self, row: usize, content: &[String]) {
        if let Some(cells) = self.rows.get_mut(row) {
            for (cell, text) in cells.iter_mut().zip(content) {
                cell.clone_from(text);
            }
        }
    }

    pub fn set_cell(&mut self, row: usize, col: usize, text: impl Into<String>) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            *cell = text.into();
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// 文档中的一个块
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Table(GridTable),
    Paragraph(String),
}

/// 未加样式的报告文档
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDocument {
    pub blocks: Vec<Block>,
}

/// 按表顺序生成报告结构
///
/// 每个表依次输出: 标题 `表名(注释)`、字段表格、一个空段落。
pub fn build_document(tables: &[TableRecord], config: &ReportConfig) -> ReportDocument {
    let mut blocks = Vec::with_capacity(tables.len() * 3);
    for table in tables {
        blocks.push(Block::Heading(table_heading(table, config)));
        blocks.push(Block::Table(table_grid(table, config)));
        blocks.push(Block::Paragraph(String::new()));
    }
    ReportDocument { blocks }
}

fn table_heading(table: &TableRecord, config: &ReportConfig) -> String {
    let placeholder = &config.output.placeholder;
    format!(
        "{}({})",
        or_placeholder(Some(table.name.as_str()), placeholder),
        or_placeholder(Some(table.comment.as_str()), placeholder)
    )
}

/// 第 1、2 行为表名与功能，第 3 行为字段表头，之后每个字段一行
fn table_grid(table: &TableRecord, config: &ReportConfig) -> GridTable {
    let labels = &config.labels;
    let placeholder = config.output.placeholder.as_str();

    let mut grid = GridTable::new(table.fields.len() + HEADER_ROW_COUNT, FIELD_COLUMN_COUNT);

    grid.set_cell(0, 0, labels.table_name.as_str());
    grid.set_cell(0, 1, or_placeholder(Some(table.name.as_str()), placeholder));
    grid.set_cell(1, 0, labels.purpose.as_str());
    grid.set_cell(1, 1, or_placeholder(Some(table.comment.as_str()), placeholder));

    grid.fill_row(2, &labels.field_header());

    for (index, field) in table.fields.iter().enumerate() {
        let row = vec![
            or_placeholder(Some(field.name.as_str()), placeholder).to_string(),
            or_placeholder(Some(field.data_type.as_str()), placeholder).to_string(),
            labels.nullable_text(field.nullable).to_string(),
            or_placeholder(field.default_value.as_deref(), placeholder).to_string(),
            or_placeholder(field.comment.as_deref(), placeholder).to_string(),
        ];
        grid.fill_row(HEADER_ROW_COUNT + index, &row);
    }

    grid
}
