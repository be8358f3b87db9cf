//! Route module for template compilation and ordering
//!
//! Contains pure functional components:
//! - `format` - parameter formats and custom format registry
//! - `pattern` - template parsing into typed segments
//! - `priority` - specificity ordering of compiled routes

pub mod format;
pub mod pattern;
pub mod priority;

// Re-export commonly used types
pub use format::{FormatRegistry, ParamFormat};
pub use pattern::{
    classify_segment, compile_path, compile_query, compile_template, parse_param_token,
    parse_query_entry, CompiledTemplate, ParamToken, PathSegment, QueryParam,
};
pub use priority::{compare_specificity, sort_by_specificity, CompiledRoute};
