//! Query interpreter.
//!
//! Reads origin, destination and time from a rider's free-text query,
//! ranks the possible readings, and phrases them back as questions.

mod error;
mod interpreter;
mod normalize;
mod suggest;
mod time_entity;

pub use error::InterpretError;
pub use interpreter::{LocationQuery, QueryInterpreter};
pub use normalize::QueryNormalizer;
pub use suggest::{CLARIFICATION_REQUEST, SOMETHING_ELSE, Suggestions, generate_suggestions};
pub use time_entity::{ClockTimeExtractor, NoTimeExtraction, TimeEntityExtractor};
