//! 分页排版
//!
//! 贪心换行：一行能放下就继续放，放不下就换行；行的纵坐标低于下边距时换页。

use std::mem;

use crate::document::metrics::FontMetrics;

/// 页面几何参数（单位：pt，1/72 英寸，原点在左下角）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub left_margin: f32,
    pub right_margin: f32,
    /// 第一行基线位置
    pub top_margin: f32,
    pub bottom_margin: f32,
    pub line_height: f32,
    pub font_size: f32,
}

impl Default for PageGeometry {
    /// US Letter，正文宽 500pt，12pt 字号，行高 24pt
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            left_margin: 50.0,
            right_margin: 550.0,
            top_margin: 750.0,
            bottom_margin: 50.0,
            line_height: 24.0,
            font_size: 12.0,
        }
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.right_margin - self.left_margin
    }
}

/// 已确定位置的一行文本
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// 一页上的所有行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub lines: Vec<PlacedLine>,
}

struct Cursor<'a> {
    geometry: &'a PageGeometry,
    pages: Vec<LaidOutPage>,
    y: f32,
}

impl<'a> Cursor<'a> {
    fn new(geometry: &'a PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![LaidOutPage::default()],
            y: geometry.top_margin,
        }
    }

    fn draw(&mut self, text: String) {
        let line = PlacedLine {
            x: self.geometry.left_margin,
            y: self.y,
            text,
        };
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(line);
        }
    }

    /// 页眉用：只下移，不检查换页
    fn skip_lines(&mut self, count: f32) {
        self.y -= self.geometry.line_height * count;
    }

    /// 正文用：下移一行，越过下边距时开新页
    fn next_line(&mut self) {
        self.y -= self.geometry.line_height;
        if self.y < self.geometry.bottom_margin {
            self.pages.push(LaidOutPage::default());
            self.y = self.geometry.top_margin;
        }
    }
}

/// 排版：页眉（标题 + URL + 一行空白）后接正文
pub fn layout_document(
    title: &str,
    url_label: &str,
    body: &str,
    geometry: &PageGeometry,
    metrics: &dyn FontMetrics,
) -> Vec<LaidOutPage> {
    let mut cursor = Cursor::new(geometry);

    cursor.draw(format!("Title: {}", title));
    cursor.skip_lines(1.0);
    cursor.draw(format!("URL: {}", url_label));
    cursor.skip_lines(2.0);

    let max_width = geometry.content_width();
    let mut line = String::new();

    for word in body.split_whitespace() {
        if line.is_empty() {
            // 单个超宽的词也独占一行
            line.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", line, word);
        if metrics.text_width(&candidate, geometry.font_size) < max_width {
            line = candidate;
        } else {
            cursor.draw(mem::take(&mut line));
            cursor.next_line();
            line.push_str(word);
        }
    }

    if !line.is_empty() {
        cursor.draw(line);
    }

    cursor.pages
}
