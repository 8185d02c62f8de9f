pub mod headless;
pub mod session;

pub use headless::{ChromeSession, ChromeSessionFactory};
pub use session::{BrowserSession, BrowserSessionFactory};
