use clap::Parser;
use ddl_doc::{Cli, CliApp, EXIT_OK, exit_code_for, project_info, setup_logging};
use tracing::{debug, error, info};

fn main() {
    // 解析命令行参数
    let cli = Cli::parse();

    // 设置日志记录，guard 需要持有到进程结束
    let log_guard = setup_logging(cli.verbose);
    debug!("{}", project_info::get_version_string());

    let code = match CliApp::from_cli(&cli).and_then(|app| app.run(&cli)) {
        Ok(Some(summary)) => {
            info!(
                "✅ 完成: {} 个表, {} 个字段 → {} ({})",
                summary.table_count,
                summary.field_count,
                summary.output.display(),
                summary.format
            );
            EXIT_OK
        }
        Ok(None) => EXIT_OK,
        Err(e) => {
            error!("❌ 操作失败: {:#}", e);
            exit_code_for(&e)
        }
    };

    // process::exit 不会执行析构，先刷新文件日志
    drop(log_guard);
    std::process::exit(code);
}
