/// 字段定义
///
/// `default_value` 与 `comment` 缺失时为 `None`，与空字符串区分开。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    pub name: String,
    /// 去掉注释、默认值、NOT NULL 之后剩余的类型表达式，如 `varchar(32)`
    pub data_type: String,
    pub default_value: Option<String>,
    pub nullable: bool,
    pub comment: Option<String>,
}

impl FieldRecord {
    /// 单行摘要，供调试日志使用
    pub fn summary(&self) -> String {
        format!(
            "[字段名]: {}, [类型]: {}, [默认值]: {}, [可为空]: {}, [注释]: {}",
            self.name,
            self.data_type,
            self.default_value.as_deref().unwrap_or("-"),
            self.nullable,
            self.comment.as_deref().unwrap_or("-"),
        )
    }
}

/// 表定义
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRecord {
    pub name: String,
    /// 表注释，可能为空字符串
    pub comment: String,
    pub fields: Vec<FieldRecord>,
}

/// 从脚本中截取出的原始表块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock<'a> {
    pub name: &'a str,
    pub body: &'a str,
    pub comment: &'a str,
}
