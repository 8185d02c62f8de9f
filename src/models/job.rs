//! 任务相关数据结构
//!
//! 一个 URL 对应一个 [`ScrapeJob`]，处理完成后产出一个 [`JobOutcome`]。

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::JobError;
use crate::utils::text::text_preview;

/// 单个抓取任务
#[derive(Debug, Clone)]
pub struct ScrapeJob {
    /// 提交顺序中的位置（从1开始，仅用于日志）
    pub index: usize,
    /// 原始 URL 字符串
    pub url: String,
}

impl ScrapeJob {
    pub fn new(index: usize, url: impl Into<String>) -> Self {
        Self {
            index,
            url: url.into(),
        }
    }

    /// 校验 URL 是否为合法的绝对地址
    pub fn parsed_url(&self) -> Result<Url, JobError> {
        let parsed = Url::parse(&self.url).map_err(|e| JobError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(JobError::InvalidUrl {
                url: self.url.clone(),
                reason: "不是可导航的绝对地址".to_string(),
            });
        }
        Ok(parsed)
    }
}

impl Display for ScrapeJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[任务 #{} {}]", self.index, self.url)
    }
}

/// 页面渲染结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderResult {
    /// 页面标题（可能为空）
    pub title: String,
    /// 规范化后的正文
    pub full_text: String,
}

/// 单个 URL 的最终结果
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JobOutcome {
    pub url: String,
    pub title: String,
    pub text_preview: String,
    /// PDF 路径；文档生成失败时为空
    pub artifact_path: Option<PathBuf>,
    /// 仅在任务失败时存在
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobOutcome {
    pub fn succeeded(url: impl Into<String>, rendered: &RenderResult, artifact_path: Option<PathBuf>) -> Self {
        Self {
            url: url.into(),
            title: rendered.title.clone(),
            text_preview: text_preview(&rendered.full_text),
            artifact_path,
            error: None,
        }
    }

    pub fn failed(url: impl Into<String>, error: &JobError) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            text_preview: String::new(),
            artifact_path: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// 批量结果，按完成顺序排列
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct BatchResult {
    pub outcomes: Vec<JobOutcome>,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    /// 成功但没有生成 PDF 的数量
    pub fn missing_artifact_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.is_success() && o.artifact_path.is_none())
            .count()
    }
}

/// 批量失败策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    /// 每个 URL 都有结果，失败的结果携带错误信息
    #[default]
    Partial,
    /// 第一个失败即终止整个批次，不返回任何结果
    FailFast,
}

impl FromStr for BatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "partial" => Ok(BatchMode::Partial),
            "fail_fast" => Ok(BatchMode::FailFast),
            other => Err(format!("未知的批量模式: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_url_is_rejected() {
        let job = ScrapeJob::new(1, "/just/a/path");
        assert!(matches!(job.parsed_url(), Err(JobError::InvalidUrl { .. })));
    }

    #[test]
    fn test_mailto_is_rejected() {
        let job = ScrapeJob::new(1, "mailto:someone@example.com");
        assert!(job.parsed_url().is_err());
    }

    #[test]
    fn test_absolute_url_is_accepted() {
        let job = ScrapeJob::new(2, "https://example.com/a?b=1");
        assert_eq!(job.parsed_url().unwrap().host_str(), Some("example.com"));
    }

    #[test]
    fn test_outcome_serializes_without_error_on_success() {
        let rendered = RenderResult {
            title: "T".to_string(),
            full_text: "hello".to_string(),
        };
        let outcome = JobOutcome::succeeded("https://a.com", &rendered, None);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["text_preview"], "hello...");
        assert!(json["artifact_path"].is_null());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_batch_mode_parse() {
        assert_eq!("fail-fast".parse::<BatchMode>().unwrap(), BatchMode::FailFast);
        assert_eq!("Partial".parse::<BatchMode>().unwrap(), BatchMode::Partial);
        assert!("whatever".parse::<BatchMode>().is_err());
    }

    #[test]
    fn test_batch_counts() {
        let ok = JobOutcome::succeeded("a", &RenderResult::default(), None);
        let bad = JobOutcome::failed("b", &JobError::TimedOut(std::time::Duration::from_secs(1)));
        let batch = BatchResult {
            outcomes: vec![ok, bad],
        };
        assert_eq!(batch.success_count(), 1);
        assert_eq!(batch.failure_count(), 1);
        assert_eq!(batch.missing_artifact_count(), 1);
    }
}
