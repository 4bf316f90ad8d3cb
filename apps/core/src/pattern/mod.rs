//! # Pattern Module
//!
//! Channel/pattern classification: which delivery channels a response should
//! use, with category, priority, and confidence.
//!
//! ## Components
//! - `profile`: per-character delivery profiles (validated config data)
//! - `classifier`: weighted keyword classification with safe fallback

pub mod classifier;
pub mod profile;

pub use classifier::{PatternClassifier, ResponsePattern};
pub use profile::{
    CharacterResponseProfile, Priority, ProfileRegistry, ResponseCategory, ResponseType,
};
