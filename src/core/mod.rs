pub mod aliases;
pub mod app;
pub mod bars;
pub mod chunk;
pub mod compose;
pub mod config;
pub mod record;
pub mod render;
pub mod scraper;
