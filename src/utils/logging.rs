/// 日志工具模块
///
/// 负责初始化 tracing，并提供批量处理的日志格式化函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::BatchResult;

/// 初始化全局日志
///
/// `RUST_LOG` 优先；否则按 `verbose` 选择 debug / info。重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, total_urls: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 网页抓取 / PDF 生成");
    info!("📄 待处理 URL: {}", total_urls);
    if config.max_concurrent_jobs == 0 {
        info!("📊 最大并发数: 不限制");
    } else {
        info!("📊 最大并发数: {}", config.max_concurrent_jobs);
    }
    info!("📁 输出目录: {}", config.output_dir.display());
    info!("⚙️ 批量模式: {:?}", config.batch_mode);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(result: &BatchResult, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", result.success_count(), result.len());
    info!("❌ 失败: {}", result.failure_count());
    if result.missing_artifact_count() > 0 {
        info!("⚠️ 成功但未生成 PDF: {}", result.missing_artifact_count());
    }
    info!("{}", "=".repeat(60));
    info!("\nPDF 已保存至: {}", config.output_dir.display());
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_only_marks_long_text() {
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("abc", 3), "abc");
    }
}
