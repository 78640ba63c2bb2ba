mod docx;
mod layout;
mod markdown;
mod style;


use crate::config::{OutputFormat, ReportConfig};
use crate::ddl::TableRecord;
use crate::error::{DocError, Result};
use std::fs;
use std::path::Path;
use tracing::info;

// 重新导出公共接口
pub use docx::DocxSink;
pub use layout::{Block, GridTable, ReportDocument, build_document, or_placeholder};
pub use markdown::MarkdownSink;
pub use style::{CellMerge, StyledBlock, StyledDocument, StyledTable, style_document, style_table};

/// 报告输出端: 接收解析好的表定义，生成文档并写入目标文件
pub trait ReportSink {
    fn config(&self) -> &ReportConfig;

    /// 把带样式的文档序列化为目标格式
    fn render(&self, document: &StyledDocument) -> Result<Vec<u8>>;

    /// 表定义 → 报告结构 → 带样式的文档
    fn prepare(&self, tables: &[TableRecord]) -> StyledDocument {
        let config = self.config();
        style_document(build_document(tables, config), &config.style)
    }

    fn write_report(&self, tables: &[TableRecord], dest: &Path) -> Result<()> {
        info!("开始导出 {} 个表到文档", tables.len());

        let content = self.render(&self.prepare(tables))?;
        fs::write(dest, content).map_err(|e| DocError::output_write(dest, e))?;

        info!("表结构已导出到 {}", dest.display());
        Ok(())
    }
}

/// 按输出格式创建对应的输出端
pub fn sink_for(format: OutputFormat, config: ReportConfig) -> Box<dyn ReportSink> {
    match format {
        OutputFormat::Docx => Box::new(DocxSink::new(config)),
        OutputFormat::Markdown => Box::new(MarkdownSink::new(config)),
    }
}
