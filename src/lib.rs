//! EV Twin-Track - side-by-side comparison of two electric vehicle models
//!
//! The library builds a comparison prompt, sends it to a search-grounded
//! Gemini model, and parses the labelled free-text answer into themed
//! sections, a similarity score, a spec table and source citations.

#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::format_push_string)] // Performance improvement but stylistic
#![allow(clippy::return_self_not_must_use)] // Builder pattern is clear enough
#![allow(clippy::too_many_arguments)] // Some functions legitimately need many params

pub mod cli;
pub mod commands;
pub mod common;
pub mod compare;
pub mod config;
pub mod llm_providers;
pub mod logger;
pub mod messages;
pub mod ui;

// Re-export important structs and functions for easier testing
pub use compare::{
    Citation, ComparisonError, ComparisonRequest, ComparisonResult, ComparisonService,
    ComparisonSession, ParsedSections, RawResponse, SectionKey,
};
pub use config::Config;
pub use llm_providers::{GeminiProvider, LLMProvider, LLMProviderConfig};
