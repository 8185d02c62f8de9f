//! 错误类型定义
//!
//! 按层划分：浏览器 / 渲染 / 文档 / 任务 / 批量 / 配置，
//! 最终都可以汇总为 [`AppError`]。

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 页面渲染错误
    #[error("渲染错误: {0}")]
    Render(#[from] RenderError),
    /// 文档生成错误
    #[error("文档错误: {0}")]
    Document(#[from] DocumentError),
    /// 单个任务错误
    #[error("任务错误: {0}")]
    Job(#[from] JobError),
    /// 批量处理错误
    #[error("批量处理错误: {0}")]
    Batch(#[from] BatchError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 浏览器会话错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 浏览器配置失败
    #[error("浏览器配置失败: {0}")]
    ConfigurationFailed(String),
    /// 启动浏览器失败
    #[error("启动浏览器失败: {source}")]
    LaunchFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptExecutionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 关闭浏览器失败
    #[error("关闭浏览器失败: {0}")]
    CloseFailed(String),
}

impl From<chromiumoxide::error::CdpError> for BrowserError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        BrowserError::ScriptExecutionFailed {
            source: Box::new(err),
        }
    }
}

impl From<serde_json::Error> for BrowserError {
    fn from(err: serde_json::Error) -> Self {
        BrowserError::ScriptExecutionFailed {
            source: Box::new(err),
        }
    }
}

/// 页面渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 导航失败
    #[error("无法打开 {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: BrowserError,
    },
    /// 等待元素超时
    #[error("等待元素 <{selector}> 超时 ({waited:?})")]
    Timeout { selector: String, waited: Duration },
    /// 滚动加载一直没有稳定下来
    #[error("页面内容在 {rounds} 轮滚动 / {elapsed:?} 内未稳定")]
    StabilizationTimeout { rounds: usize, elapsed: Duration },
    /// 自动化会话错误
    #[error("浏览器会话错误: {0}")]
    Session(#[from] BrowserError),
    /// 被调用方取消
    #[error("渲染已取消")]
    Cancelled,
    /// 超过任务截止时间
    #[error("渲染超过截止时间")]
    DeadlineExceeded,
}

/// 文档生成错误（由 DocumentWriter 记录后吞掉）
#[derive(Debug, Error)]
pub enum DocumentError {
    /// PDF 编码失败
    #[error("PDF 编码失败: {0}")]
    Encode(String),
    /// 写入输出位置失败
    #[error("写入文件失败 ({key}): {source}")]
    Sink {
        key: String,
        #[source]
        source: std::io::Error,
    },
    /// 布局线程异常退出
    #[error("排版任务异常退出: {0}")]
    Worker(String),
}

impl From<lopdf::Error> for DocumentError {
    fn from(err: lopdf::Error) -> Self {
        DocumentError::Encode(err.to_string())
    }
}

/// 单个 URL 的处理错误
#[derive(Debug, Error)]
pub enum JobError {
    /// URL 不是合法的绝对地址
    #[error("无效的 URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    /// 渲染失败
    #[error(transparent)]
    Render(#[from] RenderError),
    /// 超过单任务时限
    #[error("任务超时 ({0:?})")]
    TimedOut(Duration),
    /// 工作任务崩溃
    #[error("任务执行失败: {0}")]
    Panicked(String),
}

/// 批量处理错误
#[derive(Debug, Error)]
pub enum BatchError {
    /// fail-fast 模式下某个任务失败
    #[error("处理 {url} 时出错: {source}")]
    JobFailed {
        url: String,
        #[source]
        source: JobError,
    },
    /// fail-fast 模式下整批被调用方取消
    #[error("批量处理已取消")]
    Cancelled,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
