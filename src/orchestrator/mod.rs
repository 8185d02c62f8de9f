//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量处理器
//! - 每个 URL 一个独立任务，Semaphore 控制并发
//! - 按完成顺序收集结果
//! - partial / fail-fast 两种失败策略
//!
//! ### `app` - 应用入口
//! - 按配置组装浏览器、输出目录、流程
//! - 输出启动信息与最终统计
//!
//! ## 层次关系
//!
//! ```text
//! app
//!     ↓
//! batch_processor (处理 Vec<URL>)
//!     ↓
//! workflow::ScrapeFlow (处理单个 URL)
//!     ↓
//! services (能力层：PageRenderer / DocumentWriter)
//!     ↓
//! browser / document / infrastructure
//! ```

pub mod app;
pub mod batch_processor;

pub use app::App;
pub use batch_processor::BatchProcessor;
