// src/lib.rs

#[macro_use]
pub mod macros;

pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod file;
pub mod logger;
pub mod progress;
pub mod records;
pub mod runner;
pub mod schema;
pub mod scrape;
pub mod store;
