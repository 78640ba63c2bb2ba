// 私有模块声明
mod app;
mod cli;
pub mod project_info; // 公开项目信息模块
mod utils;

// 通过 pub use 精确控制对外暴露的接口
pub use app::{CliApp, EXIT_FAILURE, EXIT_NO_TABLES, EXIT_OK, RunSummary, exit_code_for};
pub use cli::Cli;
pub use utils::{LOG_FILE_ENV, setup_logging};
