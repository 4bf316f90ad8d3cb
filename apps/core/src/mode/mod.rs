//! # Mode Module
//!
//! Response length/style selection and instruction rendering.
//!
//! ## Components
//! - `selector`: the three-preset priority rule
//! - `instruction`: deterministic directive-block templating

pub mod instruction;
pub mod selector;

pub use instruction::generate_instruction;
pub use selector::{ModeSelector, ResponseLengthConfig, ResponseMode, ResponseStyle};
