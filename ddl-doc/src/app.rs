use anyhow::{Context, Result};
use ddl_core::DocError;
use ddl_core::config::{OutputFormat, ReportConfig};
use ddl_core::ddl::{DdlParser, TableRecord, TracingObserver, read_sql_script};
use ddl_core::report::sink_for;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::cli::Cli;

/// 退出码: 成功
pub const EXIT_OK: i32 = 0;
/// 退出码: 读取、解析配置或写入失败
pub const EXIT_FAILURE: i32 = 1;
/// 退出码: 严格模式下没有找到任何表
pub const EXIT_NO_TABLES: i32 = 2;

/// 一次转换的结果汇总
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub table_count: usize,
    pub field_count: usize,
    pub format: OutputFormat,
    pub output: PathBuf,
}

pub struct CliApp {
    pub config: ReportConfig,
    parser: DdlParser,
}

impl CliApp {
    pub fn new(config: ReportConfig) -> Result<Self> {
        let parser = DdlParser::new().context("初始化 SQL 解析器失败")?;
        Ok(Self { config, parser })
    }

    /// 按命令行参数加载配置并初始化
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = ReportConfig::find_and_load_config(cli.config.as_deref())
            .context("加载配置文件失败")?;
        Self::new(config)
    }

    /// 运行命令，返回转换结果；只导出配置时返回 `None`
    pub fn run(&self, cli: &Cli) -> Result<Option<RunSummary>> {
        if let Some(path) = &cli.dump_config {
            self.config
                .save_to_file(path)
                .with_context(|| format!("写入配置文件 {} 失败", path.display()))?;
            info!("配置已写入 {}", path.display());
            return Ok(None);
        }

        let (Some(input), Some(output)) = (&cli.input, &cli.output) else {
            anyhow::bail!("缺少输入或输出文件路径");
        };

        self.convert(input, output, cli.format, cli.strict).map(Some)
    }

    /// 读取脚本 → 解析 → 生成文档
    ///
    /// 没有找到任何表时仍然输出一个空文档；`strict` 为真时改为返回 [`DocError::NoTablesFound`]。
    pub fn convert(
        &self,
        input: &Path,
        output: &Path,
        format: Option<OutputFormat>,
        strict: bool,
    ) -> Result<RunSummary> {
        let script = read_sql_script(input)?;
        let tables = self
            .parser
            .parse_script_with(&script, &mut TracingObserver);

        if tables.is_empty() {
            if strict {
                return Err(DocError::NoTablesFound.into());
            }
            warn!("{} 中没有符合格式的建表语句，将生成空文档", input.display());
        }

        let format = self.resolve_format(format, output);
        let sink = sink_for(format, self.config.clone());
        sink.write_report(&tables, output)?;

        Ok(RunSummary {
            table_count: tables.len(),
            field_count: count_fields(&tables),
            format,
            output: output.to_path_buf(),
        })
    }

    /// 命令行参数优先，其次是 `.md` 扩展名，最后使用配置中的格式
    pub fn resolve_format(&self, explicit: Option<OutputFormat>, output: &Path) -> OutputFormat {
        explicit.unwrap_or_else(|| match OutputFormat::from_path(output) {
            OutputFormat::Markdown => OutputFormat::Markdown,
            OutputFormat::Docx => self.config.output.format,
        })
    }
}

fn count_fields(tables: &[TableRecord]) -> usize {
    tables.iter().map(|table| table.fields.len()).sum()
}

/// 根据错误链中的 [`DocError`] 决定退出码
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    let no_tables = error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<DocError>())
        .any(|e| matches!(e, DocError::NoTablesFound));

    if no_tables { EXIT_NO_TABLES } else { EXIT_FAILURE }
}
