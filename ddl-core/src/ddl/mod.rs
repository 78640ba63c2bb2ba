mod observer;
mod parser;
mod types;

#[cfg(test)]
mod tests;

// 重新导出公共接口
pub use observer::{NoopObserver, ParseEvent, ParseObserver, RecordingObserver, TracingObserver};
pub use parser::{DdlParser, parse_sql_file, read_sql_script};
pub use types::{FieldRecord, TableBlock, TableRecord};
