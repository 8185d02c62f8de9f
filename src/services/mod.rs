pub mod document_writer;
pub mod page_renderer;

pub use document_writer::DocumentWriter;
pub use page_renderer::{stabilize, PageRenderer, RenderSettings};
