/// 配置文件相关常量
pub mod config {
    use std::path::{Path, PathBuf};

    /// 默认配置文件名
    pub const CONFIG_FILE_NAME: &str = "ddl-doc.toml";

    /// 获取默认配置文件路径（当前工作目录）
    pub fn get_default_config_path() -> PathBuf {
        Path::new(".").join(CONFIG_FILE_NAME)
    }
}

/// 报告输出相关常量
pub mod report {
    /// 缺省值占位符
    pub const DEFAULT_PLACEHOLDER: &str = "-";

    /// 字段表头列数（字段、类型、Null、默认、注释）
    pub const FIELD_COLUMN_COUNT: usize = 5;

    /// 字段行之前的固定行数（表名、功能、表头）
    pub const HEADER_ROW_COUNT: usize = 3;

    /// Markdown 输出文件扩展名
    pub const MARKDOWN_EXTENSION: &str = "md";
}

/// 文档样式默认值
pub mod style {
    /// 默认字体
    pub const DEFAULT_FONT: &str = "宋体";

    /// 默认字号（磅）
    pub const DEFAULT_FONT_SIZE_PT: f32 = 10.5;

    /// 默认表格样式
    pub const DEFAULT_TABLE_STYLE: &str = "TableGrid";

    /// Null 列宽（磅）
    pub const NULLABLE_COLUMN_WIDTH_PT: f32 = 10.0;

    /// 默认值列宽（磅）
    pub const DEFAULT_COLUMN_WIDTH_PT: f32 = 25.0;

    /// 未指定宽度的列使用的宽度（磅）
    pub const FALLBACK_COLUMN_WIDTH_PT: f32 = 90.0;
}

/// 默认标签（中文）
pub mod labels {
    pub const TABLE_NAME: &str = "表名";
    pub const PURPOSE: &str = "功能";
    pub const FIELD: &str = "字段";
    pub const TYPE: &str = "类型";
    pub const NULLABLE: &str = "Null";
    pub const DEFAULT: &str = "默认";
    pub const COMMENT: &str = "注释";
    pub const YES: &str = "是";
    pub const NO: &str = "否";
}
