//! 把排版结果编码为 PDF（标准 Helvetica 字体，无需嵌入字体文件）

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::document::layout::{LaidOutPage, PageGeometry};
use crate::error::DocumentError;

const FONT_NAME: &str = "F1";

/// 编码为 PDF 字节
pub fn encode_pdf(pages: &[LaidOutPage], geometry: &PageGeometry) -> Result<Vec<u8>, DocumentError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_NAME => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, geometry);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), geometry.page_width.into(), geometry.page_height.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| DocumentError::Encode(e.to_string()))?;
    Ok(bytes)
}

fn page_content(page: &LaidOutPage, geometry: &PageGeometry) -> Content {
    let mut operations = Vec::with_capacity(page.lines.len() * 5);
    for line in &page.lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec![FONT_NAME.into(), geometry.font_size.into()]));
        operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(win_ansi_bytes(&line.text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

/// WinAnsiEncoding：ASCII 与 Latin-1 原样输出，其余字符画成 '?'
fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ 0x20..=0x7e => code as u8,
            code @ 0xa0..=0xff => code as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::layout::layout_document;
    use crate::document::metrics::Helvetica;

    #[test]
    fn test_encoded_pdf_has_one_page_per_layout_page() {
        let geometry = PageGeometry::default();
        let body = "lorem ipsum dolor sit amet ".repeat(400);
        let pages = layout_document("Title", "a.com", &body, &geometry, &Helvetica);
        assert!(pages.len() > 1);

        let bytes = encode_pdf(&pages, &geometry).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), pages.len());
    }

    #[test]
    fn test_win_ansi_replaces_unsupported_chars() {
        assert_eq!(win_ansi_bytes("aé中"), vec![b'a', 0xe9, b'?']);
    }
}
