//! Configuration module for Shelf-Crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every setting has a built-in default, so the crawler also runs without a file.
//!
//! # Example
//!
//! ```no_run
//! use shelf_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will visit at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CeilingMode, Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_ALLOWED_DOMAIN,
    DEFAULT_DATABASE_PATH, DEFAULT_MAX_PAGES, DEFAULT_SEED_URL, DEFAULT_SKIP_PATTERNS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
