pub mod browser;
pub mod driver;
pub mod http;
pub mod listing;
pub mod traits;
pub mod types;

pub use browser::ChromeFetcher;
pub use driver::run;
pub use http::HttpFetcher;
pub use traits::PageFetcher;
