use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::browser::session::{BrowserSession, BrowserSessionFactory};
use crate::config::Config;
use crate::error::BrowserError;
use crate::infrastructure::JsExecutor;

static SESSION_COUNTER: AtomicUsize = AtomicUsize::new(0);

const SCROLL_TO_BOTTOM_JS: &str =
    "(() => { window.scrollTo(0, document.body.scrollHeight); return true; })()";
const SCROLL_HEIGHT_JS: &str = "document.body ? document.body.scrollHeight : 0";

/// 每次 open() 都启动一个新的无头浏览器进程
#[derive(Debug, Clone)]
pub struct ChromeSessionFactory {
    chrome_executable: Option<PathBuf>,
    request_timeout: Duration,
}

impl ChromeSessionFactory {
    pub fn new(chrome_executable: Option<PathBuf>, request_timeout: Duration) -> Self {
        Self {
            chrome_executable,
            request_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.chrome_executable.clone(), config.ready_timeout())
    }

    fn browser_config(&self, profile_dir: &Path) -> Result<BrowserConfig, BrowserError> {
        let mut builder = BrowserConfig::builder()
            .new_headless_mode()
            .no_sandbox()
            .user_data_dir(profile_dir)
            .request_timeout(self.request_timeout)
            .args(vec![
                "--disable-gpu",           // 无头模式下禁用 GPU
                "--disable-dev-shm-usage", // 防止共享内存不足
            ]);

        if let Some(path) = &self.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(|e| {
            error!("配置无头浏览器失败: {}", e);
            BrowserError::ConfigurationFailed(e)
        })
    }
}

#[async_trait]
impl BrowserSessionFactory for ChromeSessionFactory {
    async fn open(&self) -> Result<Box<dyn BrowserSession>, BrowserError> {
        // 每个会话一个独立的 profile 目录，避免并发启动时互相抢锁
        let profile_dir = std::env::temp_dir().join(format!(
            "scrape-to-pdf-{}-{}",
            std::process::id(),
            SESSION_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let config = self.browser_config(&profile_dir)?;

        debug!("🚀 启动无头浏览器 (profile: {})", profile_dir.display());
        let (mut browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            error!("启动无头浏览器失败: {}", e);
            BrowserError::LaunchFailed { source: Box::new(e) }
        })?;

        // 在后台处理浏览器事件
        let handler_task = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                error!("创建页面失败: {}", e);
                let _ = browser.close().await;
                handler_task.abort();
                let _ = std::fs::remove_dir_all(&profile_dir);
                return Err(BrowserError::PageCreationFailed { source: Box::new(e) });
            }
        };

        Ok(Box::new(ChromeSession {
            browser,
            executor: JsExecutor::new(page),
            handler_task,
            profile_dir,
        }))
    }
}

/// 一个无头浏览器进程 + 一个页面
pub struct ChromeSession {
    browser: Browser,
    executor: JsExecutor,
    handler_task: JoinHandle<()>,
    profile_dir: PathBuf,
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.executor.page().goto(url).await.map_err(|e| {
            error!("导航到 {} 失败: {}", url, e);
            BrowserError::NavigationFailed {
                url: url.to_string(),
                source: Box::new(e),
            }
        })?;
        info!("已导航到: {}", url);
        Ok(())
    }

    async fn has_element(&self, selector: &str) -> Result<bool, BrowserError> {
        self.executor.has_element(selector).await
    }

    async fn scroll_to_bottom(&self) -> Result<(), BrowserError> {
        self.executor.eval(SCROLL_TO_BOTTOM_JS).await?;
        Ok(())
    }

    async fn scroll_height(&self) -> Result<u64, BrowserError> {
        let height: f64 = self.executor.eval_as(SCROLL_HEIGHT_JS).await?;
        Ok(height.max(0.0).round() as u64)
    }

    async fn title(&self) -> Result<String, BrowserError> {
        Ok(self.executor.page().get_title().await?.unwrap_or_default())
    }

    async fn element_text(&self, selector: &str) -> Result<String, BrowserError> {
        self.executor.inner_text(selector).await
    }

    async fn close(self: Box<Self>) -> Result<(), BrowserError> {
        let mut session = self;
        let closed = session.browser.close().await;
        if let Err(e) = session.browser.wait().await {
            warn!("等待浏览器进程退出失败: {}", e);
        }
        session.handler_task.abort();
        debug!("浏览器会话已关闭");
        closed
            .map(|_| ())
            .map_err(|e| BrowserError::CloseFailed(e.to_string()))
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        // 进程本身由 Browser 的 Drop 负责结束
        self.handler_task.abort();
        let _ = std::fs::remove_dir_all(&self.profile_dir);
    }
}
