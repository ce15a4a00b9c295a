//! dissect-core — Content store, round engine, and scoring.
//!
//! This crate defines the quiz content, the per-session round state machine,
//! and the scoring rules that the `dissect` CLI drives.

pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod model;
pub mod picker;
pub mod report;
pub mod session;
pub mod statistics;

pub use content::ContentStore;
pub use engine::RoundEngine;
pub use error::QuizError;
pub use session::SessionState;
