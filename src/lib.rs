pub mod api;
pub mod config;
pub mod digest;
pub mod internal;
pub mod scrape;
pub mod utils;
