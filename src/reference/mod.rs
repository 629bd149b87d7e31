//! Reference documents
//!
//! The instruction document and the price catalog that make up the system
//! instruction for every quote.

pub mod loader;

pub use loader::{ReferenceDocs, ReferenceLoader};
