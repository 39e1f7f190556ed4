pub mod builder;
pub mod cache;
pub mod merge;
pub mod models;
pub mod render;
