// src/web/handlers/mod.rs
pub mod analysis_handlers;
pub mod job_handlers;
pub mod resume_handlers;
pub mod score_handlers;
pub mod system_handlers;

pub use analysis_handlers::*;
pub use job_handlers::*;
pub use resume_handlers::*;
pub use score_handlers::*;
pub use system_handlers::*;
