//! # Scrape to PDF
//!
//! 批量抓取动态网页，提取可见正文，为每个 URL 生成一份多页 PDF。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源，只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 能力
//! - `OutputSink` - 产物写到哪里
//! - `CancelSignal` - 取消信号
//!
//! ### ② 浏览器 / 文档
//! - `browser/` - `BrowserSessionFactory`：每个任务一个隔离的无头浏览器
//! - `document/` - 字体度量、贪心换行分页、PDF 编码
//!
//! ### ③ 业务能力层（Services）
//! - `PageRenderer` - 导航、等待、滚动稳定、提取正文
//! - `DocumentWriter` - 排版并保存 PDF，失败只记日志
//!
//! ### ④ 流程层（Workflow）
//! - `ScrapeFlow` - 一个 URL 的完整流程（render → write → outcome）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `BatchProcessor` - 并发分发、按完成顺序收集、失败策略
//! - `App` - 按配置组装整个管线

pub mod browser;
pub mod config;
pub mod document;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::{BrowserSession, BrowserSessionFactory, ChromeSessionFactory};
pub use config::Config;
pub use error::{AppError, AppResult, BatchError, JobError, RenderError};
pub use infrastructure::{CancelHandle, CancelSignal, DirectorySink, MemorySink, OutputSink};
pub use models::{BatchMode, BatchResult, JobOutcome, RenderResult, ScrapeJob};
pub use orchestrator::{App, BatchProcessor};
pub use services::{DocumentWriter, PageRenderer, RenderSettings};
pub use workflow::ScrapeFlow;
