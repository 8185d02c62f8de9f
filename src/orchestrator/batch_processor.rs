//! 批量处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **任务分发**：每个 URL 一个 tokio 任务，互不依赖
//! 2. **并发控制**：使用 Semaphore 限制同时运行的任务数（0 = 不限制）
//! 3. **结果收集**：按完成顺序收集，每个 URL 恰好一个结果
//! 4. **失败策略**：partial 模式记录失败继续；fail-fast 模式取消剩余任务并整体失败，
//!    被取消的任务仍会关闭各自的浏览器会话，全部结束后才返回

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::error::{BatchError, JobError, RenderError};
use crate::infrastructure::{CancelHandle, CancelSignal};
use crate::models::{BatchMode, BatchResult, JobOutcome, ScrapeJob};
use crate::workflow::ScrapeFlow;

/// 批量处理器
pub struct BatchProcessor {
    flow: Arc<ScrapeFlow>,
    max_concurrent_jobs: usize,
    mode: BatchMode,
}

impl BatchProcessor {
    pub fn new(flow: ScrapeFlow) -> Self {
        Self {
            flow: Arc::new(flow),
            max_concurrent_jobs: 0,
            mode: BatchMode::default(),
        }
    }

    /// 0 表示不限制（每个 URL 一个 worker）
    pub fn with_max_concurrent_jobs(mut self, max: usize) -> Self {
        self.max_concurrent_jobs = max;
        self
    }

    pub fn with_mode(mut self, mode: BatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> BatchMode {
        self.mode
    }

    /// 处理一批 URL
    ///
    /// partial 模式下结果数量总是等于 URL 数量；
    /// fail-fast 模式下任一任务失败即返回 `BatchError`，已完成的结果被丢弃。
    pub async fn process_batch(&self, urls: Vec<String>, cancel: &CancelSignal) -> Result<BatchResult, BatchError> {
        let total = urls.len();
        let permits = match self.max_concurrent_jobs {
            0 => total.max(1),
            n => n,
        };
        let semaphore = Arc::new(Semaphore::new(permits));

        // fail-fast 时用来叫停本批次的其余任务
        let (batch_cancel, batch_signal) = CancelHandle::channel();
        let job_signal = cancel.or(&batch_signal);

        let mut running = FuturesUnordered::new();

        for (idx, url) in urls.into_iter().enumerate() {
            let job = ScrapeJob::new(idx + 1, url);
            let url = job.url.clone();
            let flow = self.flow.clone();
            let semaphore = semaphore.clone();
            let signal = job_signal.clone();

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                flow.run(&job, &signal).await
            });
            running.push(async move { (url, handle.await) });
        }

        let mut outcomes = Vec::with_capacity(total);

        // 按完成顺序收集
        while let Some((url, joined)) = running.next().await {
            let result = joined.unwrap_or_else(|e| Err(JobError::Panicked(e.to_string())));

            match result {
                Ok(outcome) => {
                    info!("[{}/{}] ✅ {}", outcomes.len() + 1, total, url);
                    outcomes.push(outcome);
                }
                Err(e) => {
                    error!("[{}/{}] ❌ 处理 {} 失败: {}", outcomes.len() + 1, total, url, e);
                    match self.mode {
                        BatchMode::Partial => outcomes.push(JobOutcome::failed(url, &e)),
                        BatchMode::FailFast => {
                            batch_cancel.cancel();
                            let pending = running.len();
                            if pending > 0 {
                                warn!("⏹️ fail-fast：等待其余 {} 个任务关闭浏览器会话", pending);
                            }
                            while running.next().await.is_some() {}

                            if matches!(e, JobError::Render(RenderError::Cancelled)) && cancel.is_cancelled() {
                                return Err(BatchError::Cancelled);
                            }
                            return Err(BatchError::JobFailed { url, source: e });
                        }
                    }
                }
            }
        }

        Ok(BatchResult { outcomes })
    }
}
