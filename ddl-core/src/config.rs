use crate::constants::{config, labels, report, style};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// 报告配置结构
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub labels: Labels,
    pub style: StyleConfig,
    pub output: OutputConfig,
}

/// 文档中出现的固定文字
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Labels {
    pub table_name: String,
    pub purpose: String,
    pub field: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub nullable: String,
    pub default: String,
    pub comment: String,
    pub yes: String,
    pub no: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            table_name: labels::TABLE_NAME.to_string(),
            purpose: labels::PURPOSE.to_string(),
            field: labels::FIELD.to_string(),
            type_: labels::TYPE.to_string(),
            nullable: labels::NULLABLE.to_string(),
            default: labels::DEFAULT.to_string(),
            comment: labels::COMMENT.to_string(),
            yes: labels::YES.to_string(),
            no: labels::NO.to_string(),
        }
    }
}

impl Labels {
    /// 可为空 → 是，不可为空 → 否
    pub fn nullable_text(&self, nullable: bool) -> &str {
        if nullable { &self.yes } else { &self.no }
    }

    /// 字段表头: 字段、类型、Null、默认、注释
    pub fn field_header(&self) -> Vec<String> {
        vec![
            self.field.clone(),
            self.type_.clone(),
            self.nullable.clone(),
            self.default.clone(),
            self.comment.clone(),
        ]
    }
}

/// 文档样式配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    pub font: String,
    /// 单位: 磅
    pub font_size: f32,
    pub table_style: String,
    pub nullable_column_width: f32,
    pub default_column_width: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font: style::DEFAULT_FONT.to_string(),
            font_size: style::DEFAULT_FONT_SIZE_PT,
            table_style: style::DEFAULT_TABLE_STYLE.to_string(),
            nullable_column_width: style::NULLABLE_COLUMN_WIDTH_PT,
            default_column_width: style::DEFAULT_COLUMN_WIDTH_PT,
        }
    }
}

/// 输出相关配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub placeholder: String,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            placeholder: report::DEFAULT_PLACEHOLDER.to_string(),
            format: OutputFormat::Docx,
        }
    }
}

/// 输出文档格式
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Docx,
    Markdown,
}

impl OutputFormat {
    /// 根据输出文件扩展名推断格式，`.md` 为 Markdown，其余为 docx
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(report::MARKDOWN_EXTENSION) => Self::Markdown,
            _ => Self::Docx,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Docx => write!(f, "docx"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "docx" => Ok(Self::Docx),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!("不支持的输出格式: {other}（可选: docx, markdown）")),
        }
    }
}

impl ReportConfig {
    /// 查找并加载配置文件
    ///
    /// 优先使用显式指定的路径；否则查找当前目录下的 ddl-doc.toml；都没有时使用默认配置。
    pub fn find_and_load_config(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::info!("使用配置文件: {}", path.display());
            return Self::load_from_file(path);
        }

        let default_path = config::get_default_config_path();
        if default_path.exists() {
            tracing::info!("找到配置文件: {}", default_path.display());
            return Self::load_from_file(&default_path);
        }

        tracing::debug!("未找到配置文件，使用默认配置");
        Ok(Self::default())
    }

    /// 从指定文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: ReportConfig = toml::from_str(&content)?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_with_comments();
        fs::write(&path, content)?;
        Ok(())
    }

    /// 生成带注释的TOML配置
    pub fn to_toml_with_comments(&self) -> String {
        const TEMPLATE: &str = include_str!("../templates/ddl-doc.toml.template");

        TEMPLATE
            .replace("{table_name}", &quoted(&self.labels.table_name))
            .replace("{purpose}", &quoted(&self.labels.purpose))
            .replace("{field}", &quoted(&self.labels.field))
            .replace("{type}", &quoted(&self.labels.type_))
            .replace("{nullable}", &quoted(&self.labels.nullable))
            .replace("{default}", &quoted(&self.labels.default))
            .replace("{comment}", &quoted(&self.labels.comment))
            .replace("{yes}", &quoted(&self.labels.yes))
            .replace("{no}", &quoted(&self.labels.no))
            .replace("{font}", &quoted(&self.style.font))
            .replace("{font_size}", &number(self.style.font_size))
            .replace("{table_style}", &quoted(&self.style.table_style))
            .replace(
                "{nullable_column_width}",
                &number(self.style.nullable_column_width),
            )
            .replace(
                "{default_column_width}",
                &number(self.style.default_column_width),
            )
            .replace("{placeholder}", &quoted(&self.output.placeholder))
            .replace("{format}", &quoted(&self.output.format.to_string()))
    }
}

/// 转成带转义的 TOML 字符串字面量
fn quoted(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

/// 浮点数总是带小数点输出，保证读回时仍是浮点
fn number(value: f32) -> String {
    toml::Value::Float(f64::from(value)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        let config = ReportConfig::default();
        assert_eq!(config.labels.nullable_text(true), "是");
        assert_eq!(config.labels.nullable_text(false), "否");
        assert_eq!(
            config.labels.field_header(),
            vec!["字段", "类型", "Null", "默认", "注释"]
        );
        assert_eq!(config.output.placeholder, "-");
        assert_eq!(config.output.format, OutputFormat::Docx);
    }

    #[test]
    fn test_partial_config() {
        let config: ReportConfig = toml::from_str(
            r#"
[labels]
yes = "Yes"
no = "No"
type = "Type"

[output]
format = "markdown"
"#,
        )
        .unwrap();

        assert_eq!(config.labels.yes, "Yes");
        assert_eq!(config.labels.type_, "Type");
        assert_eq!(config.labels.table_name, "表名");
        assert_eq!(config.style, StyleConfig::default());
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert_eq!(config.output.placeholder, "-");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ddl-doc.toml");

        let mut config = ReportConfig::default();
        config.labels.comment = "说明 \"备注\"".to_string();
        config.style.font_size = 12.0;
        config.save_to_file(&path).unwrap();

        let loaded = ReportConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[output]\nformat = \"pdf\"\n").unwrap();

        let err = ReportConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, crate::error::DocError::Config(_)));
    }

    #[test]
    fn test_format_from_path_and_str() {
        assert_eq!(OutputFormat::from_path(Path::new("out.md")), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_path(Path::new("out.MD")), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_path(Path::new("out.docx")), OutputFormat::Docx);
        assert_eq!(OutputFormat::from_path(Path::new("out")), OutputFormat::Docx);
        assert_eq!("Markdown".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert!("pdf".parse::<OutputFormat>().is_err());
    }
}
