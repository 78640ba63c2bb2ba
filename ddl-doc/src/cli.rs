use crate::project_info::{metadata, version_info};
use clap::Parser;
use ddl_core::config::OutputFormat;
use std::path::PathBuf;

/// DDL Doc - 从 SQL 建表脚本生成表结构文档
#[derive(Parser, Debug)]
#[command(name = metadata::PROJECT_NAME)]
#[command(about = metadata::PROJECT_DESCRIPTION)]
#[command(version = version_info::CLI_VERSION)]
#[command(long_about = metadata::display::DESCRIPTION_LONG)]
#[command(author = metadata::PROJECT_AUTHORS)]
pub struct Cli {
    /// SQL 建表脚本路径（UTF-8 编码）
    #[arg(required_unless_present = "dump_config")]
    pub input: Option<PathBuf>,

    /// 输出文档路径
    #[arg(required_unless_present = "dump_config")]
    pub output: Option<PathBuf>,

    /// 配置文件路径（默认查找当前目录下的 ddl-doc.toml）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出格式: docx 或 markdown（默认根据输出文件扩展名和配置决定）
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// 没有解析到任何表时报错退出（退出码 2），不生成文档
    #[arg(long)]
    pub strict: bool,

    /// 详细输出
    #[arg(short, long)]
    pub verbose: bool,

    /// 把当前生效的配置写入指定文件后退出
    #[arg(long, value_name = "PATH")]
    pub dump_config: Option<PathBuf>,
}
