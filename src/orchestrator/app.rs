use std::sync::Arc;

use tracing::warn;

use crate::browser::{BrowserSessionFactory, ChromeSessionFactory};
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{CancelSignal, DirectorySink, OutputSink};
use crate::models::BatchResult;
use crate::orchestrator::BatchProcessor;
use crate::services::{DocumentWriter, PageRenderer, RenderSettings};
use crate::utils::logging;
use crate::workflow::ScrapeFlow;

/// 应用主结构
pub struct App {
    config: Config,
    processor: BatchProcessor,
}

impl App {
    /// 按配置组装：无头 Chromium + 输出目录
    pub fn initialize(config: Config) -> Self {
        let factory = Arc::new(ChromeSessionFactory::from_config(&config));
        let sink = Arc::new(DirectorySink::new(&config.output_dir));
        Self::with_components(config, factory, sink)
    }

    /// 使用自定义的浏览器工厂和输出位置
    pub fn with_components(
        config: Config,
        factory: Arc<dyn BrowserSessionFactory>,
        sink: Arc<dyn OutputSink>,
    ) -> Self {
        let renderer = PageRenderer::new(factory, RenderSettings::from_config(&config));
        let writer = DocumentWriter::new(sink);
        let flow = ScrapeFlow::new(renderer, writer)
            .with_unique_filenames(config.unique_filenames)
            .with_job_timeout(config.job_timeout());
        let processor = BatchProcessor::new(flow)
            .with_max_concurrent_jobs(config.max_concurrent_jobs)
            .with_mode(config.batch_mode);

        Self { config, processor }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 运行一批 URL
    pub async fn run(&self, urls: Vec<String>, cancel: CancelSignal) -> AppResult<BatchResult> {
        if urls.is_empty() {
            warn!("⚠️ 没有需要处理的 URL，程序结束");
            return Ok(BatchResult::default());
        }

        logging::log_startup(&self.config, urls.len());

        let result = self.processor.process_batch(urls, &cancel).await?;

        logging::print_final_stats(&result, &self.config);

        Ok(result)
    }
}
