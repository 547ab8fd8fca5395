pub mod collector;
pub mod config;
pub mod export;
pub mod fetcher;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod prompt;
pub mod utils;
