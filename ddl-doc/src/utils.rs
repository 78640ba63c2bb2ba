use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;

/// 设置后日志写入该文件而不是终端
pub const LOG_FILE_ENV: &str = "DDL_DOC_LOG_FILE";

const DEFAULT_LOG_FILE_NAME: &str = "ddl-doc.log";

/// 初始化日志
///
/// - `RUST_LOG` 优先；否则 `-v` 为 debug，默认 info
/// - 设置了 `DDL_DOC_LOG_FILE` 时日志异步写入文件，包含模块路径与行号；
///   返回的 guard 需要在 main 中一直持有，drop 时刷新缓冲
/// - 否则输出到终端，使用简洁格式
pub fn setup_logging(verbose: bool) -> Option<WorkerGuard> {
    use tracing_subscriber::{EnvFilter, fmt};

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Ok(log_file) = std::env::var(LOG_FILE_ENV) {
        let (dir, file_name) = split_log_path(Path::new(&log_file));
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);

        fmt()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .init();
        Some(guard)
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(false) // 不显示模块路径
            .with_line_number(false)
            .without_time()
            .compact()
            .init();
        None
    }
}

/// 拆成 (目录, 文件名)，没有目录时使用当前目录
fn split_log_path(path: &Path) -> (PathBuf, PathBuf) {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE_NAME));
    (dir, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_path() {
        assert_eq!(
            split_log_path(Path::new("logs/ddl.log")),
            (PathBuf::from("logs"), PathBuf::from("ddl.log"))
        );
        assert_eq!(
            split_log_path(Path::new("ddl.log")),
            (PathBuf::from("."), PathBuf::from("ddl.log"))
        );
        assert_eq!(
            split_log_path(Path::new("/")),
            (PathBuf::from("."), PathBuf::from(DEFAULT_LOG_FILE_NAME))
        );
    }
}
