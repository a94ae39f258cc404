// src/lib.rs
//! CareerPilot - career-services API with a pure ATS resume scoring core.

pub mod account_cli;
pub mod ai_gateway;
pub mod auth;
pub mod config;
pub mod database;
pub mod job_search;
pub mod scoring;
pub mod templates;
pub mod types;
pub mod utils;
pub mod web;

pub use config::ConfigManager;
pub use scoring::{score_resume, AtsScore, CheckKind, ScoreBand};
pub use types::resume::ResumeRecord;
pub use web::start_web_server;
