//! 集成测试用的假浏览器
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use scrape_to_pdf::error::BrowserError;
use scrape_to_pdf::{BrowserSession, BrowserSessionFactory};

/// 一个假页面的脚本
#[derive(Debug, Clone)]
pub struct FakePage {
    pub title: String,
    pub text: String,
    /// 依次返回的高度，用完后保持最后一个值
    pub heights: Vec<u64>,
    /// 导航时的额外耗时
    pub load_delay: Duration,
    /// 导航失败时的错误信息
    pub fail_with: Option<String>,
}

impl FakePage {
    pub fn new(title: &str, text: &str) -> Self {
        Self {
            title: title.to_string(),
            text: text.to_string(),
            heights: vec![1000],
            load_delay: Duration::ZERO,
            fail_with: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::new("", "")
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    pub fn with_heights(mut self, heights: &[u64]) -> Self {
        self.heights = heights.to_vec();
        self
    }
}

#[derive(Debug, Default)]
pub struct Counters {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub active: AtomicUsize,
    pub peak_active: AtomicUsize,
}

/// 按 URL 返回脚本页面的工厂
#[derive(Default)]
pub struct FakeBrowser {
    pages: HashMap<String, FakePage>,
    pub counters: Arc<Counters>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }
}

#[async_trait]
impl BrowserSessionFactory for FakeBrowser {
    async fn open(&self) -> Result<Box<dyn BrowserSession>, BrowserError> {
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        let active = self.counters.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak_active.fetch_max(active, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            pages: self.pages.clone(),
            current: Mutex::new(None),
            heights: Mutex::new(VecDeque::new()),
            counters: self.counters.clone(),
        }))
    }
}

struct FakeSession {
    pages: HashMap<String, FakePage>,
    current: Mutex<Option<FakePage>>,
    heights: Mutex<VecDeque<u64>>,
    counters: Arc<Counters>,
}

impl FakeSession {
    fn current(&self) -> Option<FakePage> {
        self.current.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let page = self.pages.get(url).cloned().ok_or_else(|| BrowserError::NavigationFailed {
            url: url.to_string(),
            source: "net::ERR_NAME_NOT_RESOLVED".into(),
        })?;

        tokio::time::sleep(page.load_delay).await;
        if let Some(reason) = &page.fail_with {
            return Err(BrowserError::NavigationFailed {
                url: url.to_string(),
                source: reason.clone().into(),
            });
        }

        *self.heights.lock().unwrap() = page.heights.iter().copied().collect();
        *self.current.lock().unwrap() = Some(page);
        Ok(())
    }

    async fn has_element(&self, _selector: &str) -> Result<bool, BrowserError> {
        Ok(self.current().is_some())
    }

    async fn scroll_to_bottom(&self) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn scroll_height(&self) -> Result<u64, BrowserError> {
        let mut heights = self.heights.lock().unwrap();
        Ok(if heights.len() > 1 {
            heights.pop_front().unwrap_or(0)
        } else {
            heights.front().copied().unwrap_or(0)
        })
    }

    async fn title(&self) -> Result<String, BrowserError> {
        Ok(self.current().map(|p| p.title).unwrap_or_default())
    }

    async fn element_text(&self, _selector: &str) -> Result<String, BrowserError> {
        Ok(self.current().map(|p| p.text).unwrap_or_default())
    }

    async fn close(self: Box<Self>) -> Result<(), BrowserError> {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
        self.counters.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}
