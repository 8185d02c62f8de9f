//! 页面渲染服务 - 业务能力层
//!
//! 负责"打开一个 URL，等动态内容加载完，拿到标题和正文"。
//! 每次调用都使用独立的浏览器会话，任何退出路径都会关闭会话。

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, sleep_until, timeout, Instant};
use tracing::{debug, info, warn};

use crate::browser::{BrowserSession, BrowserSessionFactory};
use crate::config::Config;
use crate::error::RenderError;
use crate::infrastructure::CancelSignal;
use crate::models::RenderResult;
use crate::utils::logging::truncate_text;
use crate::utils::normalize_text;

/// 渲染参数
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// 页面就绪的标志元素，同时也是正文提取的根元素
    pub root_selector: String,
    pub ready_timeout: Duration,
    pub ready_poll_interval: Duration,
    /// 每次滚动后等待异步内容加载的时间
    pub settle_interval: Duration,
    pub max_scroll_rounds: usize,
    pub max_stabilize: Duration,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            root_selector: "body".to_string(),
            ready_timeout: Duration::from_secs(30),
            ready_poll_interval: Duration::from_millis(250),
            settle_interval: Duration::from_secs(2),
            max_scroll_rounds: 50,
            max_stabilize: Duration::from_secs(120),
        }
    }
}

impl RenderSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            ready_timeout: config.ready_timeout(),
            settle_interval: config.settle_interval(),
            max_scroll_rounds: config.max_scroll_rounds,
            max_stabilize: config.max_stabilize(),
            ..Self::default()
        }
    }
}

/// 页面渲染器
#[derive(Clone)]
pub struct PageRenderer {
    factory: Arc<dyn BrowserSessionFactory>,
    settings: RenderSettings,
}

impl PageRenderer {
    pub fn new(factory: Arc<dyn BrowserSessionFactory>, settings: RenderSettings) -> Self {
        Self { factory, settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// 渲染一个页面
    ///
    /// 会话在成功、出错、超时、取消时都会被关闭。
    pub async fn render(&self, url: &str, cancel: &CancelSignal) -> Result<RenderResult, RenderError> {
        self.render_until(url, cancel, None).await
    }

    /// 带截止时间的渲染；到期返回 `RenderError::DeadlineExceeded`，会话同样会被关闭
    pub async fn render_until(
        &self,
        url: &str,
        cancel: &CancelSignal,
        deadline: Option<Instant>,
    ) -> Result<RenderResult, RenderError> {
        if cancel.is_cancelled() {
            return Err(RenderError::Cancelled);
        }

        let expired = deadline_reached(deadline);
        tokio::pin!(expired);

        let session = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(RenderError::Cancelled),
            _ = &mut expired => return Err(RenderError::DeadlineExceeded),
            opened = self.factory.open() => opened?,
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RenderError::Cancelled),
            _ = &mut expired => Err(RenderError::DeadlineExceeded),
            rendered = self.render_in_session(session.as_ref(), url) => rendered,
        };

        if let Err(e) = session.close().await {
            warn!("关闭浏览器会话失败 ({}): {}", url, e);
        }

        result
    }

    async fn render_in_session(&self, session: &dyn BrowserSession, url: &str) -> Result<RenderResult, RenderError> {
        info!("正在抓取: {}", url);
        session
            .navigate(url)
            .await
            .map_err(|source| RenderError::Navigation {
                url: url.to_string(),
                source,
            })?;

        self.wait_until_ready(session).await?;

        let rounds = stabilize(session, &self.settings).await?;
        debug!("页面内容在 {} 轮滚动后稳定: {}", rounds, url);

        let title = session.title().await?;
        let raw_text = session.element_text(&self.settings.root_selector).await?;
        let full_text = normalize_text(&raw_text);

        info!(
            "✓ 抓取完成: {} | 标题: {} | 正文 {} 字符",
            url,
            truncate_text(&title, 40),
            full_text.chars().count()
        );

        Ok(RenderResult { title, full_text })
    }

    /// 等待根元素出现
    async fn wait_until_ready(&self, session: &dyn BrowserSession) -> Result<(), RenderError> {
        let selector = &self.settings.root_selector;
        let poll = async {
            loop {
                if session.has_element(selector).await? {
                    return Ok::<(), RenderError>(());
                }
                sleep(self.settings.ready_poll_interval).await;
            }
        };

        match timeout(self.settings.ready_timeout, poll).await {
            Ok(ready) => ready,
            Err(_) => Err(RenderError::Timeout {
                selector: selector.clone(),
                waited: self.settings.ready_timeout,
            }),
        }
    }
}

/// 滚动稳定循环
///
/// 滚到底部、等待、测量高度；高度与上一次相同即认为加载完毕。
/// 超过轮数或时长上限时返回 `StabilizationTimeout`。返回实际滚动次数。
pub async fn stabilize(session: &dyn BrowserSession, settings: &RenderSettings) -> Result<usize, RenderError> {
    let started = Instant::now();
    let mut last_height = session.scroll_height().await?;
    let mut rounds = 0;

    loop {
        if rounds >= settings.max_scroll_rounds || started.elapsed() >= settings.max_stabilize {
            return Err(RenderError::StabilizationTimeout {
                rounds,
                elapsed: started.elapsed(),
            });
        }

        session.scroll_to_bottom().await?;
        rounds += 1;
        sleep(settings.settle_interval).await;

        let new_height = session.scroll_height().await?;
        debug!("第 {} 轮滚动: 高度 {} -> {}", rounds, last_height, new_height);
        if new_height == last_height {
            return Ok(rounds);
        }
        last_height = new_height;
    }
}

async fn deadline_reached(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}
