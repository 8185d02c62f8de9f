//! 单个 URL 的处理流程 - 流程层
//!
//! 流程顺序：
//! 1. 校验 URL
//! 2. 渲染页面（标题 + 正文）
//! 3. 生成 PDF（失败不影响任务结果）
//! 4. 组装 JobOutcome

use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, warn};

use crate::error::{JobError, RenderError};
use crate::infrastructure::CancelSignal;
use crate::models::{JobOutcome, ScrapeJob};
use crate::services::{DocumentWriter, PageRenderer};
use crate::utils::{clean_filename, unique_filename};

/// 单个 URL 的处理流程
///
/// - 不持有浏览器，每次渲染由 PageRenderer 申请新会话
/// - 只依赖业务能力（services）
#[derive(Clone)]
pub struct ScrapeFlow {
    renderer: PageRenderer,
    writer: DocumentWriter,
    unique_filenames: bool,
    job_timeout: Option<Duration>,
}

impl ScrapeFlow {
    pub fn new(renderer: PageRenderer, writer: DocumentWriter) -> Self {
        Self {
            renderer,
            writer,
            unique_filenames: true,
            job_timeout: None,
        }
    }

    /// false 时使用与 URL 一一对应但可能重名的截断文件名
    pub fn with_unique_filenames(mut self, unique: bool) -> Self {
        self.unique_filenames = unique;
        self
    }

    pub fn with_job_timeout(mut self, limit: Option<Duration>) -> Self {
        self.job_timeout = limit;
        self
    }

    /// 输出文件名
    pub fn artifact_key(&self, url: &str) -> String {
        if self.unique_filenames {
            unique_filename(url)
        } else {
            clean_filename(url)
        }
    }

    /// 执行完整流程
    ///
    /// 单任务时限只约束渲染阶段，到期时会话照常关闭。
    pub async fn run(&self, job: &ScrapeJob, cancel: &CancelSignal) -> Result<JobOutcome, JobError> {
        let deadline = self.job_timeout.map(|limit| Instant::now() + limit);
        let url = job.parsed_url()?;

        info!("{} 开始渲染", job);
        let rendered = self
            .renderer
            .render_until(url.as_str(), cancel, deadline)
            .await
            .map_err(|e| match (e, self.job_timeout) {
                (RenderError::DeadlineExceeded, Some(limit)) => JobError::TimedOut(limit),
                (e, _) => JobError::Render(e),
            })?;

        let key = self.artifact_key(&job.url);
        let artifact_path = self
            .writer
            .write_blocking(rendered.title.clone(), rendered.full_text.clone(), key)
            .await;
        if artifact_path.is_none() {
            warn!("{} ⚠️ 页面已抓取，但未生成 PDF", job);
        }

        Ok(JobOutcome::succeeded(job.url.clone(), &rendered, artifact_path))
    }
}
