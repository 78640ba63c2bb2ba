use super::types::FieldRecord;
use tracing::{debug, info, warn};

/// 解析过程中产生的诊断事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    TablesFound(usize),
    TableStarted(String),
    FieldParsed { table: String, field: String },
    TableFinished { table: String, field_count: usize },
}

/// 解析诊断观察者
///
/// 解析器本身不直接写日志，所有诊断信息都通过观察者传出，
/// 调用方决定是写入 tracing、收集起来还是直接丢弃。
pub trait ParseObserver {
    fn tables_found(&mut self, _count: usize) {}
    fn table_started(&mut self, _table: &str) {}
    fn field_parsed(&mut self, _table: &str, _field: &FieldRecord) {}
    fn table_finished(&mut self, _table: &str, _field_count: usize) {}
}

/// 丢弃所有事件
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ParseObserver for NoopObserver {}

/// 把诊断事件转发到 tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ParseObserver for TracingObserver {
    fn tables_found(&mut self, count: usize) {
        if count == 0 {
            warn!("脚本中没有找到任何表定义");
        } else {
            info!("找到 {} 个表", count);
        }
    }

    fn table_started(&mut self, table: &str) {
        info!("表: {}", table);
    }

    fn field_parsed(&mut self, _table: &str, field: &FieldRecord) {
        debug!("  字段信息: {}", field.summary());
    }

    fn table_finished(&mut self, table: &str, field_count: usize) {
        info!("表 {} 找到 {} 个字段", table, field_count);
    }
}

/// 记录所有事件，便于检查解析过程
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<ParseEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每个表的字段数量，按出现顺序
    pub fn field_counts(&self) -> Vec<(String, usize)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ParseEvent::TableFinished { table, field_count } => {
                    Some((table.clone(), *field_count))
                }
                _ => None,
            })
            .collect()
    }
}

impl ParseObserver for RecordingObserver {
    fn tables_found(&mut self, count: usize) {
        self.events.push(ParseEvent::TablesFound(count));
    }

    fn table_started(&mut self, table: &str) {
        self.events.push(ParseEvent::TableStarted(table.to_string()));
    }

    fn field_parsed(&mut self, table: &str, field: &FieldRecord) {
        self.events.push(ParseEvent::FieldParsed {
            table: table.to_string(),
            field: field.name.clone(),
        });
    }

    fn table_finished(&mut self, table: &str, field_count: usize) {
        self.events.push(ParseEvent::TableFinished {
            table: table.to_string(),
            field_count,
        });
    }
}
