pub mod analytics;
pub mod cache;
pub mod catalog;
pub mod category;
pub mod clean;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod map;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod record;
pub mod source;
pub mod stats;
pub mod table;
