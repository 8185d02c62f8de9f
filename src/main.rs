use std::path::Path;

use anyhow::{Context, Result};
use scrape_to_pdf::utils::logging;
use scrape_to_pdf::{App, CancelHandle, Config};
use tracing::warn;

const USAGE: &str = "用法: scrape_to_pdf <URL>... | @urls.txt";

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let urls = collect_urls(std::env::args().skip(1))?;
    if urls.is_empty() {
        warn!("{}", USAGE);
        return Ok(());
    }

    // Ctrl-C 取消所有进行中的任务
    let (cancel, signal) = CancelHandle::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("收到 Ctrl-C，正在取消所有任务...");
            cancel.cancel();
        }
    });

    // 初始化并运行应用
    let app = App::initialize(config);
    let result = app.run(urls, signal).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

/// 命令行参数：直接写 URL，或 `@文件` 按行读取（忽略空行和 # 注释）
fn collect_urls(args: impl Iterator<Item = String>) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    for arg in args {
        match arg.strip_prefix('@') {
            Some(path) => {
                let content = std::fs::read_to_string(Path::new(path))
                    .with_context(|| format!("无法读取 URL 列表: {}", path))?;
                urls.extend(
                    content
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty() && !line.starts_with('#'))
                        .map(String::from),
                );
            }
            None => urls.push(arg),
        }
    }
    Ok(urls)
}
