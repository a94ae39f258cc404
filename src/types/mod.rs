// src/types/mod.rs
pub mod response;
pub mod resume;
