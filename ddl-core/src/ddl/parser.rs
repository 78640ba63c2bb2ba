use super::observer::{ParseObserver, TracingObserver};
use super::types::{FieldRecord, TableBlock, TableRecord};
use crate::error::{DocError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

/// 表块: CREATE TABLE `name` ( ... ) ENGINE=InnoDB ... COMMENT='...' ... ;
///
/// 多行模式 + `.` 匹配换行，正文与注释都是非贪婪捕获。
/// 正文在第一个只包含 `)` 的行处结束，因此字段类型里的 `decimal(10,2)` 不受影响。
const TABLE_BLOCK_PATTERN: &str =
    r"(?msR)^CREATE TABLE\s+?`(.+?)`\s+?\($(.*?)^\s*?\)\s+?ENGINE=InnoDB.*?COMMENT='(.*?)'.*?;$";

/// 行首的反引号字段名
const FIELD_NAME_PATTERN: &str = r"^`([^`]+)`";
/// COMMENT '注释'
const FIELD_COMMENT_PATTERN: &str = r"COMMENT\s+'([^']*)'";
/// DEFAULT 值，值后面至少跟一个空白
const FIELD_DEFAULT_PATTERN: &str = r"DEFAULT\s+(\S+)\s+";
const FIELD_NOT_NULL_PATTERN: &str = r"NOT\s+NULL";
/// 类型里不保留的字符
const FIELD_RESIDUAL_PATTERN: &str = r"[\s,]";

/// 基于正则的 CREATE TABLE 解析器
///
/// 所有正则在构造时编译一次，之后解析过程不会失败。
#[derive(Debug, Clone)]
pub struct DdlParser {
    table_block: Regex,
    field_name: Regex,
    field_comment: Regex,
    field_default: Regex,
    field_not_null: Regex,
    field_residual: Regex,
}

impl DdlParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            table_block: Regex::new(TABLE_BLOCK_PATTERN)?,
            field_name: Regex::new(FIELD_NAME_PATTERN)?,
            field_comment: Regex::new(FIELD_COMMENT_PATTERN)?,
            field_default: Regex::new(FIELD_DEFAULT_PATTERN)?,
            field_not_null: Regex::new(FIELD_NOT_NULL_PATTERN)?,
            field_residual: Regex::new(FIELD_RESIDUAL_PATTERN)?,
        })
    }

    /// 从脚本中找出所有表块，按出现顺序返回
    ///
    /// 没有匹配时返回空列表，不视为错误。
    pub fn extract_table_blocks<'a>(&self, script: &'a str) -> Vec<TableBlock<'a>> {
        self.table_block
            .captures_iter(script)
            .filter_map(|caps| {
                Some(TableBlock {
                    name: caps.get(1)?.as_str(),
                    body: caps.get(2)?.as_str(),
                    comment: caps.get(3)?.as_str(),
                })
            })
            .collect()
    }

    /// 解析单行字段定义
    ///
    /// 依次剥离 字段名 → 注释 → 默认值 → NOT NULL，剩下的内容去掉空白和逗号后作为类型。
    /// 行首不是反引号字段名的行（空行、PRIMARY KEY、KEY 等）返回 `None`。
    pub fn parse_field_line(&self, line: &str) -> Option<FieldRecord> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (residual, name) = strip_clause(line, &self.field_name);
        let name = name?;
        let (residual, comment) = strip_clause(&residual, &self.field_comment);
        let (residual, default_value) = strip_clause(&residual, &self.field_default);
        let (residual, not_null) = strip_clause(&residual, &self.field_not_null);

        let data_type = self
            .field_residual
            .replace_all(residual.trim(), "")
            .into_owned();

        Some(FieldRecord {
            name,
            data_type,
            default_value,
            nullable: not_null.is_none(),
            comment,
        })
    }

    /// 把一个表块解析为表定义，字段顺序与源码行顺序一致
    pub fn parse_table(
        &self,
        block: &TableBlock<'_>,
        observer: &mut dyn ParseObserver,
    ) -> TableRecord {
        observer.table_started(block.name);

        let mut fields = Vec::new();
        for line in block.body.lines() {
            if let Some(field) = self.parse_field_line(line) {
                observer.field_parsed(block.name, &field);
                fields.push(field);
            }
        }

        observer.table_finished(block.name, fields.len());
        TableRecord {
            name: block.name.to_string(),
            comment: block.comment.to_string(),
            fields,
        }
    }

    /// 解析整个脚本，诊断信息写入 tracing
    pub fn parse_script(&self, script: &str) -> Vec<TableRecord> {
        self.parse_script_with(script, &mut TracingObserver)
    }

    /// 解析整个脚本，诊断信息交给指定的观察者
    pub fn parse_script_with(
        &self,
        script: &str,
        observer: &mut dyn ParseObserver,
    ) -> Vec<TableRecord> {
        let blocks = self.extract_table_blocks(script);
        observer.tables_found(blocks.len());

        blocks
            .iter()
            .map(|block| self.parse_table(block, observer))
            .collect()
    }
}

/// 在 `line` 中查找 `pattern`：命中时返回 (所有匹配替换为单个空格后的行, 第一处匹配的捕获值)，
/// 未命中时原样返回。没有捕获组的模式返回整个匹配文本。
fn strip_clause(line: &str, pattern: &Regex) -> (String, Option<String>) {
    match pattern.captures(line) {
        Some(caps) => {
            let value = caps
                .get(1)
                .or_else(|| caps.get(0))
                .map(|m| m.as_str().to_string());
            (pattern.replace_all(line, " ").into_owned(), value)
        }
        None => (line.to_string(), None),
    }
}

/// 读取 UTF-8 编码的 SQL 脚本
///
/// 文件不存在时返回 [`DocError::InputNotFound`]，其它读取失败返回 [`DocError::Io`]。
pub fn read_sql_script<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DocError::InputNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    debug!("读取 SQL 脚本 {} ({} 字节)", path.display(), content.len());

    // 去掉 BOM，否则第一个 CREATE TABLE 无法匹配行首
    Ok(content
        .strip_prefix('\u{feff}')
        .map(str::to_string)
        .unwrap_or(content))
}

/// 读取并解析 SQL 脚本文件
pub fn parse_sql_file<P: AsRef<Path>>(
    path: P,
    observer: &mut dyn ParseObserver,
) -> Result<Vec<TableRecord>> {
    let script = read_sql_script(path)?;
    let parser = DdlParser::new()?;
    Ok(parser.parse_script_with(&script, observer))
}
