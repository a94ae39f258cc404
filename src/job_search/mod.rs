// src/job_search/mod.rs
//! Job search via a third-party scraping-as-a-service API: start a run,
//! poll its status with a fixed delay and bounded retry count, then
//! reshape the scraped items with heuristics.

pub mod client;
pub mod types;

pub use client::ScrapeClient;
pub use types::{JobPosting, JobSearchQuery};
