//! 文档排版与 PDF 编码
//!
//! `layout` 只做几何计算（纯函数，方便测试），`pdf` 把排版结果编码为字节。

pub mod layout;
pub mod metrics;
pub mod pdf;

pub use layout::{layout_document, LaidOutPage, PageGeometry, PlacedLine};
pub use metrics::{FontMetrics, Helvetica};
pub use pdf::encode_pdf;
