//! Quote contract
//!
//! The request/response types, the declarative quote schema, and the
//! normalization and recovery steps wrapped around the upstream call.

pub mod normalize;
pub mod recovery;
pub mod schema;
pub mod types;

pub use normalize::{normalize, DecodingMode, ModelPolicy, NormalizedRequest};
pub use recovery::{recover_quote, schema_mismatch};
pub use types::{GenerationRequest, Message, Quote, QuoteResponse, Role};
