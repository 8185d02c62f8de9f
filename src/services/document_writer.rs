//! 文档写入服务 - 业务能力层
//!
//! 只负责"把标题和正文排成多页 PDF 并保存"。
//! 失败只记录日志并返回 None，不会让任务失败。

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use crate::document::{encode_pdf, layout_document, FontMetrics, Helvetica, PageGeometry};
use crate::error::DocumentError;
use crate::infrastructure::OutputSink;
use crate::utils::filename::EXTENSION;

/// 文档写入服务
#[derive(Clone)]
pub struct DocumentWriter {
    sink: Arc<dyn OutputSink>,
    geometry: PageGeometry,
    metrics: Arc<dyn FontMetrics>,
}

impl DocumentWriter {
    /// 默认 Letter 页面 + Helvetica 12pt
    pub fn new(sink: Arc<dyn OutputSink>) -> Self {
        Self {
            sink,
            geometry: PageGeometry::default(),
            metrics: Arc::new(Helvetica),
        }
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// 生成并保存 PDF，失败时返回 None
    pub fn write(&self, title: &str, full_text: &str, key: &str) -> Option<PathBuf> {
        match self.try_write(title, full_text, key) {
            Ok(path) => {
                info!("📄 PDF 已保存: {}", path.display());
                Some(path)
            }
            Err(e) => {
                error!("保存 PDF 失败: {}", e);
                None
            }
        }
    }

    /// 在阻塞线程池中执行 [`write`](Self::write)，排版不占用异步线程
    pub async fn write_blocking(&self, title: String, full_text: String, key: String) -> Option<PathBuf> {
        let writer = self.clone();
        match tokio::task::spawn_blocking(move || writer.write(&title, &full_text, &key)).await {
            Ok(path) => path,
            Err(e) => {
                error!("保存 PDF 失败: {}", DocumentError::Worker(e.to_string()));
                None
            }
        }
    }

    /// 返回错误而不是吞掉，供需要区分失败原因的调用方使用
    pub fn try_write(&self, title: &str, full_text: &str, key: &str) -> Result<PathBuf, DocumentError> {
        let url_label = key.strip_suffix(EXTENSION).unwrap_or(key);
        let pages = layout_document(title, url_label, full_text, &self.geometry, self.metrics.as_ref());
        let bytes = encode_pdf(&pages, &self.geometry)?;

        self.sink
            .write(key, &bytes)
            .map_err(|source| DocumentError::Sink {
                key: key.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemorySink;
    use std::io;

    struct BrokenSink;

    impl OutputSink for BrokenSink {
        fn write(&self, _key: &str, _bytes: &[u8]) -> io::Result<PathBuf> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn test_write_returns_sink_path() {
        let sink = Arc::new(MemorySink::new());
        let writer = DocumentWriter::new(sink.clone());

        let path = writer.write("Example", "some body text", "a.com_x.pdf");

        assert_eq!(path, Some(PathBuf::from("a.com_x.pdf")));
        let bytes = sink.get("a.com_x.pdf").unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_sink_failure_is_swallowed() {
        let writer = DocumentWriter::new(Arc::new(BrokenSink));
        assert_eq!(writer.write("t", "body", "x.pdf"), None);
    }

    #[test]
    fn test_try_write_reports_sink_failure() {
        let writer = DocumentWriter::new(Arc::new(BrokenSink));
        let err = writer.try_write("t", "body", "x.pdf").unwrap_err();
        assert!(matches!(err, DocumentError::Sink { ref key, .. } if key == "x.pdf"));
    }

    #[tokio::test]
    async fn test_write_blocking_to_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = Arc::new(crate::infrastructure::DirectorySink::new(tmp.path().join("scraped_files")));
        let writer = DocumentWriter::new(sink);

        let body = "word ".repeat(5000);
        let path = writer
            .write_blocking("Long".to_string(), body, "long.pdf".to_string())
            .await
            .unwrap();

        assert!(path.exists());
        let doc = lopdf::Document::load(&path).unwrap();
        assert!(doc.get_pages().len() >= 2);
    }
}
