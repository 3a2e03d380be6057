// ==========================================
// 产线生产登记系统 - 命令行入口
// ==========================================
// 用法:
//   production-tracker dashboard [period|YYYY-MM-DD] [date]
//   production-tracker register '<form json>'
//   production-tracker delete <id>
//   production-tracker clear
//   production-tracker export [dir]
//   production-tracker options
//
// 数据库路径: PRODUCTION_TRACKER_DB_PATH 或用户数据目录
// 输出: 成功时 stdout 输出 JSON；失败时 stderr 输出错误 JSON，退出码 1
// ==========================================

use production_tracker::app::commands;
use production_tracker::app::{get_default_db_path, AppState};

const USAGE: &str = "usage: production-tracker <dashboard [period|YYYY-MM-DD] [date] | register <json> | delete <id> | clear | export [dir] | options>";

#[tokio::main]
async fn main() {
    production_tracker::logging::init();

    tracing::info!("产线生产登记系统 v{}", production_tracker::VERSION);

    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args).await {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}

async fn run(args: Vec<String>) -> Result<String, String> {
    let mut args = args.into_iter();
    let command = args.next().ok_or_else(|| USAGE.to_string())?;
    // 空白参数视为未提供
    let mut next_arg = move || args.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);
    let state = AppState::new(db_path)?;

    match command.as_str() {
        "dashboard" => {
            let period = next_arg();
            let date = next_arg();
            commands::get_dashboard(&state, period, date).await
        }
        "register" => {
            let form_json = next_arg().ok_or_else(|| USAGE.to_string())?;
            commands::register_production(&state, form_json).await
        }
        "delete" => {
            let id = next_arg()
                .ok_or_else(|| USAGE.to_string())?
                .parse::<i64>()
                .map_err(|e| format!("记录ID格式错误: {}", e))?;
            commands::delete_production(&state, id).await
        }
        "clear" => commands::clear_production(&state).await,
        "export" => commands::export_production(&state, next_arg()).await,
        "options" => commands::get_form_options(&state).await,
        _ => Err(USAGE.to_string()),
    }
}
