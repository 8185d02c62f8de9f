//! 输出位置 - 基础设施层
//!
//! 文档写入方只关心"把这些字节存到 key 下，告诉我路径"，
//! 不关心目录结构。

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::debug;

/// 产物输出能力
pub trait OutputSink: Send + Sync {
    /// 把 `bytes` 保存到 `key` 下，返回最终路径
    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<PathBuf>;
}

/// 写入固定目录（不存在时自动创建）
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for DirectorySink {
    /// 先写入同目录下的临时文件，完整写完后再改名，失败时不会留下半截文件
    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(key);

        let mut staged = NamedTempFile::new_in(&self.root)?;
        staged.write_all(bytes)?;
        staged.as_file().sync_all()?;
        staged.persist(&path).map_err(|e| e.error)?;

        debug!("写入文件: {} ({} 字节)", path.display(), bytes.len());
        Ok(path)
    }
}

/// 保存在内存中，主要用于测试和预览
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // 锁内没有会 panic 的操作，中毒时直接取回数据
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl OutputSink for MemorySink {
    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        self.lock().insert(key.to_string(), bytes.to_vec());
        Ok(PathBuf::from(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_sink_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(tmp.path().join("nested").join("out"));

        let path = sink.write("a.pdf", b"data").unwrap();

        assert_eq!(path, tmp.path().join("nested").join("out").join("a.pdf"));
        assert_eq!(fs::read(&path).unwrap(), b"data");
    }

    #[test]
    fn test_directory_sink_fails_when_root_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let sink = DirectorySink::new(&blocker);
        assert!(sink.write("a.pdf", b"data").is_err());
    }

    #[test]
    fn test_directory_sink_replaces_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(tmp.path());

        sink.write("a.pdf", b"old contents").unwrap();
        let path = sink.write("a.pdf", b"new").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_write_leaves_no_partial_file() {
        let tmp = tempfile::tempdir().unwrap();
        // 目标位置被一个非空目录占着，改名一定失败
        let occupied = tmp.path().join("a.pdf");
        fs::create_dir(&occupied).unwrap();
        fs::write(occupied.join("keep"), b"").unwrap();

        let sink = DirectorySink::new(tmp.path());
        assert!(sink.write("a.pdf", b"data").is_err());

        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("a.pdf")]);
        assert!(occupied.is_dir());
    }

    #[test]
    fn test_memory_sink_keeps_bytes() {
        let sink = MemorySink::new();
        sink.write("b.pdf", b"2").unwrap();
        sink.write("a.pdf", b"1").unwrap();
        assert_eq!(sink.keys(), vec!["a.pdf", "b.pdf"]);
        assert_eq!(sink.get("a.pdf").unwrap(), b"1");
    }
}
