pub mod cancel;
pub mod js_executor;
pub mod output_sink;

pub use cancel::{CancelHandle, CancelSignal};
pub use js_executor::JsExecutor;
pub use output_sink::{DirectorySink, MemorySink, OutputSink};
