//! Mock infrastructure for the relay's outbound calls
//!
//! - Document store (instruction document and price catalog)
//! - Gemini `generateContent`
//! - Anthropic Messages API

pub mod anthropic;
pub mod documents;
pub mod gemini;

pub use anthropic::*;
pub use documents::*;
pub use gemini::*;
