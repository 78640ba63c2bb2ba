use super::ReportSink;
use super::style::{StyledBlock, StyledDocument, StyledTable};
use crate::config::ReportConfig;
use crate::error::Result;

/// 生成 Markdown 文档，便于在代码仓库里直接查看
#[derive(Debug, Clone)]
pub struct MarkdownSink {
    config: ReportConfig,
}

impl MarkdownSink {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn render_to_string(&self, document: &StyledDocument) -> String {
        let mut out = String::new();
        for block in &document.blocks {
            match block {
                StyledBlock::Heading(text) => {
                    out.push_str(&format!("## {}\n\n", escape_cell(text)));
                }
                StyledBlock::Table(table) => write_table(&mut out, table),
                StyledBlock::Paragraph(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
        out
    }
}

impl ReportSink for MarkdownSink {
    fn config(&self) -> &ReportConfig {
        &self.config
    }

    fn render(&self, document: &StyledDocument) -> Result<Vec<u8>> {
        Ok(self.render_to_string(document).into_bytes())
    }
}

/// 横向合并的行（表名、功能）输出为 `**标签**: 值`，其余行组成管道表格，
/// 第一行非合并行作为表头。
fn write_table(out: &mut String, table: &StyledTable) {
    let mut header_written = false;

    for (row_index, row) in table.grid.rows.iter().enumerate() {
        let merged = table.merges.iter().any(|m| m.row == row_index);
        if merged {
            let label = row.first().map(String::as_str).unwrap_or_default();
            let value = row.get(1).map(String::as_str).unwrap_or_default();
            out.push_str(&format!("**{}**: {}  \n", escape_cell(label), escape_cell(value)));
            continue;
        }

        if !header_written {
            out.push('\n');
        }

        let cells: Vec<String> = row.iter().map(|cell| escape_cell(cell)).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));

        if !header_written {
            let separator = vec!["---"; row.len()].join(" | ");
            out.push_str(&format!("| {separator} |\n"));
            header_written = true;
        }
    }
    out.push('\n');
}

/// 管道符与换行会破坏表格结构
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
