//! 日志工具模块
//!
//! 初始化 tracing，并提供日志格式化和输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::SheetKind;

/// 初始化全局日志
///
/// 默认 `info` 级别，可通过 `RUST_LOG` 覆盖；`verbose` 为真时本 crate 输出 `debug`。
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "info,question_sheet=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 试卷转题库表格服务");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 监听地址: {}", config.bind_addr);
    info!("🤖 LLM 模型: {}", config.llm_model_name);
    info!(
        "📄 OCR 轮询: 每 {} 秒一次，最多 {} 次",
        config.ocr_poll_interval_secs, config.ocr_max_polls
    );
    info!("{}", "=".repeat(60));
}

/// 记录请求开始
///
/// # 参数
/// - `question_file`: 试卷文件名
/// - `answer_file`: 答案文件名
pub fn log_request_start(question_file: &str, answer_file: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📥 收到上传: 试卷 {} | 答案 {}", question_file, answer_file);
}

/// 记录分类结果
pub fn log_classified(objective: usize, subjective: usize, descriptive: usize) {
    info!(
        "✓ 分类完成: 客观题 {}, 主观题 {}, 论述题 {}",
        objective, subjective, descriptive
    );
}

/// 记录单张工作表补全完成
///
/// # 参数
/// - `kind`: 工作表类型
/// - `enriched`: 成功补全的行数
/// - `failed`: 补全失败的行数
/// - `total`: 总行数
pub fn log_sheet_complete(kind: SheetKind, enriched: usize, failed: usize, total: usize) {
    info!(
        "✓ 工作表 {} 补全完成: 成功 {}/{}，失败 {}",
        kind, enriched, total, failed
    );
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
