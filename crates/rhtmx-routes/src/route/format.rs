//! Parameter formats and their validation rules
//!
//! Every format validates the *decoded* string value, the same way for
//! path segments and query values.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, RouteError};

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

// RFC 4122: version nibble 1-5, variant nibble 8/9/a/b
static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .unwrap()
});

/// Format attached to a route parameter
///
/// # Examples
///
/// ```
/// use rhtmx_routes::ParamFormat;
///
/// assert!(ParamFormat::Integer.validate("-42"));
/// assert!(!ParamFormat::Integer.validate("4.2"));
/// assert!(ParamFormat::Float.validate("4.2"));
/// assert!(!ParamFormat::String.validate(""));
/// ```
#[derive(Debug, Clone, Default)]
pub enum ParamFormat {
    /// Any non-empty string (default)
    #[default]
    String,
    /// Finite number, surrounding whitespace allowed
    Number,
    /// Optional minus sign followed by ASCII digits
    Integer,
    /// Same rule as `Number`
    Float,
    /// Canonical 8-4-4-4-12 hex UUID
    Uuid,
    /// Caller-supplied regular expression
    Custom(Regex),
}

impl ParamFormat {
    /// Resolves a builtin format name
    ///
    /// Returns `None` for names that aren't builtin, so callers can fall
    /// back to custom formats.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "string" => Some(ParamFormat::String),
            "number" => Some(ParamFormat::Number),
            "float" => Some(ParamFormat::Float),
            "int" | "integer" => Some(ParamFormat::Integer),
            "uuid" => Some(ParamFormat::Uuid),
            _ => None,
        }
    }

    /// Checks a decoded value against this format
    pub fn validate(&self, value: &str) -> bool {
        match self {
            ParamFormat::String => !value.is_empty(),
            ParamFormat::Integer => INTEGER_REGEX.is_match(value),
            ParamFormat::Number | ParamFormat::Float => is_finite_number(value),
            ParamFormat::Uuid => UUID_REGEX.is_match(value),
            ParamFormat::Custom(regex) => regex.is_match(value),
        }
    }

    /// Short name for diagnostics
    pub fn name(&self) -> &str {
        match self {
            ParamFormat::String => "string",
            ParamFormat::Number => "number",
            ParamFormat::Integer => "integer",
            ParamFormat::Float => "float",
            ParamFormat::Uuid => "uuid",
            ParamFormat::Custom(regex) => regex.as_str(),
        }
    }
}

impl PartialEq for ParamFormat {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParamFormat::Custom(a), ParamFormat::Custom(b)) => a.as_str() == b.as_str(),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

fn is_finite_number(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .parse::<f64>()
            .map(|n| n.is_finite())
            .unwrap_or(false)
}

/// Named custom formats available to templates
///
/// Builtin names always win; a registry entry named `int` is never
/// consulted.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::{FormatRegistry, ParamFormat};
///
/// let formats = FormatRegistry::new().with_pattern("slug", "^[a-z0-9-]+$").unwrap();
///
/// let slug = formats.resolve("slug").unwrap();
/// assert!(slug.validate("hello-world"));
/// assert!(!slug.validate("Hello World"));
///
/// assert_eq!(formats.resolve("int").unwrap(), ParamFormat::Integer);
/// assert!(formats.resolve("color").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    formats: HashMap<String, Regex>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an already compiled regular expression
    pub fn with_regex(mut self, name: impl Into<String>, regex: Regex) -> Self {
        self.formats.insert(name.into(), regex);
        self
    }

    /// Compiles and registers a regular expression
    pub fn with_pattern(self, name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        match Regex::new(pattern) {
            Ok(regex) => Ok(self.with_regex(name, regex)),
            Err(source) => Err(RouteError::InvalidFormatPattern { name, source }),
        }
    }

    /// Resolves a format name used in a template
    pub fn resolve(&self, name: &str) -> Result<ParamFormat> {
        ParamFormat::builtin(name)
            .or_else(|| self.formats.get(name).cloned().map(ParamFormat::Custom))
            .ok_or_else(|| RouteError::UnsupportedFormat {
                format: name.to_string(),
            })
    }
}
