// src/ai_gateway/mod.rs
//! Client for the external AI-completion gateway.
//!
//! Every analysis forwards resume text with a prompt template and parses
//! the JSON the model returns. Transport failures propagate; malformed
//! model output degrades to static fallback reports instead of failing
//! the request.

pub mod client;
pub mod mock;
pub mod prompts;

pub use client::GatewayClient;
pub use prompts::PromptLibrary;
