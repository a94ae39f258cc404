// src/scoring/mod.rs
pub mod ats;

pub use ats::{score_resume, AtsCheck, AtsScore, CheckKind, ScoreBand};
