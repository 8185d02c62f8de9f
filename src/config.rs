use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::BatchMode;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 同时处理的 URL 数量（0 表示不限制，每个 URL 一个 worker）
    pub max_concurrent_jobs: usize,
    /// PDF 输出目录
    pub output_dir: PathBuf,
    /// 浏览器可执行文件路径（为空时自动查找）
    pub chrome_executable: Option<PathBuf>,
    /// 等待 <body> 出现的最长时间（秒）
    pub ready_timeout_secs: u64,
    /// 每次滚动后等待内容加载的时间（毫秒）
    pub settle_interval_ms: u64,
    /// 滚动稳定循环的最大轮数
    pub max_scroll_rounds: usize,
    /// 滚动稳定循环的最长时间（秒）
    pub max_stabilize_secs: u64,
    /// 单个任务的超时时间（秒，0 表示不限制）
    pub job_timeout_secs: u64,
    /// 批量失败策略
    pub batch_mode: BatchMode,
    /// 文件名是否追加 URL 哈希后缀
    pub unique_filenames: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: 0,
            output_dir: PathBuf::from("scraped_files"),
            chrome_executable: None,
            ready_timeout_secs: 30,
            settle_interval_ms: 2000,
            max_scroll_rounds: 50,
            max_stabilize_secs: 120,
            job_timeout_secs: 0,
            batch_mode: BatchMode::Partial,
            unique_filenames: true,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 读取配置：`SCRAPE_CONFIG` 指向的 TOML 文件（可选），再叠加环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("SCRAPE_CONFIG") {
            Ok(path) => Self::from_toml_file(path)?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    /// 只从环境变量读取
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件读取，缺省字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    fn with_env_overrides(self) -> Self {
        Self {
            max_concurrent_jobs: env_parse("MAX_CONCURRENT_JOBS").unwrap_or(self.max_concurrent_jobs),
            output_dir: std::env::var("OUTPUT_DIR").map(PathBuf::from).unwrap_or(self.output_dir),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").map(PathBuf::from).ok().or(self.chrome_executable),
            ready_timeout_secs: env_parse("READY_TIMEOUT_SECS").unwrap_or(self.ready_timeout_secs),
            settle_interval_ms: env_parse("SETTLE_INTERVAL_MS").unwrap_or(self.settle_interval_ms),
            max_scroll_rounds: env_parse("MAX_SCROLL_ROUNDS").unwrap_or(self.max_scroll_rounds),
            max_stabilize_secs: env_parse("MAX_STABILIZE_SECS").unwrap_or(self.max_stabilize_secs),
            job_timeout_secs: env_parse("JOB_TIMEOUT_SECS").unwrap_or(self.job_timeout_secs),
            batch_mode: env_parse("BATCH_MODE").unwrap_or(self.batch_mode),
            unique_filenames: env_parse("UNIQUE_FILENAMES").unwrap_or(self.unique_filenames),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
        }
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }

    pub fn settle_interval(&self) -> Duration {
        Duration::from_millis(self.settle_interval_ms)
    }

    pub fn max_stabilize(&self) -> Duration {
        Duration::from_secs(self.max_stabilize_secs)
    }

    /// 单任务时限，0 表示不限制
    pub fn job_timeout(&self) -> Option<Duration> {
        (self.job_timeout_secs > 0).then(|| Duration::from_secs(self.job_timeout_secs))
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
