//! 文本处理工具

/// 预览保留的字符数
pub const PREVIEW_CHARS: usize = 500;

/// 预览末尾追加的标记（无论是否截断都会追加）
pub const PREVIEW_MARKER: &str = "...";

/// 规范化正文：换行替换为空格，去掉双引号
pub fn normalize_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '"')
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}

/// 生成正文预览：前 500 个字符 + "..."
pub fn text_preview(text: &str) -> String {
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    preview.push_str(PREVIEW_MARKER);
    preview
}
