pub mod filename;
pub mod logging;
pub mod text;

pub use filename::{clean_filename, unique_filename};
pub use text::{normalize_text, text_preview};
