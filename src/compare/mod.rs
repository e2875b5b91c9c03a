mod cli;
pub mod citations;
pub mod error;
pub mod parser;
pub mod prompt;
pub mod render;
pub mod service;
pub mod session;
pub mod specs;
pub mod types;

pub use cli::{CompareOptions, handle_compare_command, handle_parse_command, handle_prompt_command};
pub use error::ComparisonError;
pub use service::{ComparisonService, GenerationSettings};
pub use session::{ComparisonSession, SessionState};
pub use types::{
    Citation, ComparisonRequest, ComparisonResult, ParsedSections, RawResponse, SectionKey,
};
