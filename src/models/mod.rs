pub mod job;

pub use job::{BatchMode, BatchResult, JobOutcome, RenderResult, ScrapeJob};
