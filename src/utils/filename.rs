//! 由 URL 生成输出文件名

use sha2::{Digest, Sha256};

/// 文件名主体的最大字符数（不含扩展名）
pub const MAX_STEM_CHARS: usize = 100;

/// 输出文件扩展名
pub const EXTENSION: &str = ".pdf";

/// 去掉协议前缀，把 `/` 和 `?` 换成 `_`，截断到 100 个字符
fn filename_stem(url: &str) -> String {
    url.replace("http://", "")
        .replace("https://", "")
        .replace('/', "_")
        .replace('?', "_")
        .chars()
        .take(MAX_STEM_CHARS)
        .collect()
}

/// 确定性的文件名，长 URL 截断后可能重名
pub fn clean_filename(url: &str) -> String {
    format!("{}{}", filename_stem(url), EXTENSION)
}

/// 在截断后的主体后追加完整 URL 的哈希，保证不同 URL 不会重名
pub fn unique_filename(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    format!("{}-{}{}", filename_stem(url), hex::encode(&digest[..8]), EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_filename_strips_scheme_and_separators() {
        assert_eq!(clean_filename("https://a.com/x?y=1"), "a.com_x_y=1.pdf");
        assert_eq!(clean_filename("http://a.com/"), "a.com_.pdf");
    }

    #[test]
    fn test_clean_filename_truncates_before_extension() {
        let url = format!("https://example.com/{}", "p".repeat(300));
        let name = clean_filename(&url);
        assert_eq!(name.chars().count(), MAX_STEM_CHARS + EXTENSION.len());
        assert!(name.ends_with(".pdf"));
    }

    #[test]
    fn test_truncated_urls_collide_without_hash() {
        let prefix = format!("https://example.com/{}", "p".repeat(120));
        let a = format!("{}/a", prefix);
        let b = format!("{}/b", prefix);
        assert_eq!(clean_filename(&a), clean_filename(&b));
        assert_ne!(unique_filename(&a), unique_filename(&b));
    }

    #[test]
    fn test_unique_filename_is_deterministic() {
        let name = unique_filename("https://a.com/x?y=1");
        assert_eq!(name, unique_filename("https://a.com/x?y=1"));
        assert!(name.starts_with("a.com_x_y=1-"));
        // 8 字节哈希 = 16 个十六进制字符
        assert_eq!(name.len(), "a.com_x_y=1-".len() + 16 + ".pdf".len());
    }
}
