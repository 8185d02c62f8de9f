//! 浏览器会话能力
//!
//! 渲染逻辑只依赖这两个 trait；真正的 Chromium 启动在 [`super::headless`]。

use async_trait::async_trait;

use crate::error::BrowserError;

/// 一个隔离的浏览器自动化会话（一个浏览器进程 + 一个页面）
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// 导航到 URL
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// 元素当前是否存在
    async fn has_element(&self, selector: &str) -> Result<bool, BrowserError>;

    /// 滚动到当前页面底部
    async fn scroll_to_bottom(&self) -> Result<(), BrowserError>;

    /// 当前可滚动内容的总高度
    async fn scroll_height(&self) -> Result<u64, BrowserError>;

    /// 页面声明的标题，没有时为空字符串
    async fn title(&self) -> Result<String, BrowserError>;

    /// 元素的渲染文本
    async fn element_text(&self, selector: &str) -> Result<String, BrowserError>;

    /// 关闭会话并释放所有资源
    async fn close(self: Box<Self>) -> Result<(), BrowserError>;
}

/// 生产全新、互相隔离的会话
#[async_trait]
pub trait BrowserSessionFactory: Send + Sync {
    async fn open(&self) -> Result<Box<dyn BrowserSession>, BrowserError>;
}
