pub mod model;

mod pattern;
mod tokenizer;

pub use model::{Pattern, Precision, Segment, SegmentKind};
pub use pattern::parse_pattern;
pub use tokenizer::tokenize;
