pub mod scrape_flow;

pub use scrape_flow::ScrapeFlow;
