//! # Brain Module
//!
//! Fast, non-LLM analysis of user input. Runs BEFORE response shaping to
//! enrich the decision pipeline with emotion, topic, and complexity signals.
//!
//! ## Components
//! - `lexicon`: swappable keyword lists (Japanese nutrition domain + English)
//! - `analysis`: output packet structure
//! - `analyzer`: keyword/regex classification

pub mod analysis;
pub mod analyzer;
pub mod lexicon;

pub use analysis::{Complexity, Emotion, MessageAnalysis};
pub use analyzer::MessageAnalyzer;
pub use lexicon::Lexicon;
