//! Template parsing for route patterns
//!
//! Turns a template such as `/users/{id:integer}?tab={tab?}` into typed
//! path segments and query parameters. Parsing is pure: the same template
//! always compiles to the same structure.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::format::{FormatRegistry, ParamFormat};
use crate::error::{Result, RouteError};

// name[:format][?]
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_-]*)(?::([A-Za-z_][A-Za-z0-9_-]*))?(\?)?$").unwrap()
});

/// One `/`-separated piece of a template path
///
/// # Examples
///
/// ```
/// use rhtmx_routes::{compile_template, FormatRegistry, ParamFormat, PathSegment};
///
/// let compiled = compile_template("/users/{id:int}", &FormatRegistry::new()).unwrap();
/// assert_eq!(compiled.path[0], PathSegment::Literal("users".to_string()));
/// assert_eq!(
///     compiled.path[1],
///     PathSegment::Param { name: "id".to_string(), format: ParamFormat::Integer }
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Text that must appear verbatim
    Literal(String),
    /// Required parameter bound to one URL segment
    Param { name: String, format: ParamFormat },
}

/// Query parameter declared by a template
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParam {
    /// Key as it appears in the query string
    pub key: String,
    /// Name the value is bound to (defaults to `key`)
    pub name: String,
    pub format: ParamFormat,
    pub optional: bool,
}

/// Parsed form of a route template
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTemplate {
    /// Template text this was compiled from
    pub template: String,
    pub path: Vec<PathSegment>,
    pub query: Vec<QueryParam>,
}

impl CompiledTemplate {
    /// Number of path segments, the primary specificity key
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Names of every parameter, path first then query
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.path
            .iter()
            .filter_map(|segment| match segment {
                PathSegment::Param { name, .. } => Some(name.as_str()),
                PathSegment::Literal(_) => None,
            })
            .chain(self.query.iter().map(|param| param.name.as_str()))
    }
}

/// Contents of a `{...}` token
#[derive(Debug, Clone, PartialEq)]
pub struct ParamToken {
    pub name: String,
    pub format: ParamFormat,
    pub optional: bool,
}

/// Parses `name[:format][?]` (without braces)
///
/// # Examples
///
/// ```
/// use rhtmx_routes::{parse_param_token, FormatRegistry, ParamFormat};
///
/// let token = parse_param_token("page:integer?", "/search", &FormatRegistry::new()).unwrap();
/// assert_eq!(token.name, "page");
/// assert_eq!(token.format, ParamFormat::Integer);
/// assert!(token.optional);
///
/// assert!(parse_param_token("9lives", "/cats", &FormatRegistry::new()).is_err());
/// ```
pub fn parse_param_token(
    token: &str,
    template: &str,
    formats: &FormatRegistry,
) -> Result<ParamToken> {
    let captures = TOKEN_REGEX
        .captures(token)
        .ok_or_else(|| RouteError::InvalidToken {
            token: token.to_string(),
            template: template.to_string(),
        })?;

    let format = match captures.get(2) {
        Some(name) => formats.resolve(name.as_str())?,
        None => ParamFormat::String,
    };

    Ok(ParamToken {
        name: captures[1].to_string(),
        format,
        optional: captures.get(3).is_some(),
    })
}

/// Strips the surrounding braces of a parameter token
fn braced(text: &str) -> Option<&str> {
    text.strip_prefix('{').and_then(|s| s.strip_suffix('}'))
}

/// Classifies one path segment of a template
pub fn classify_segment(
    segment: &str,
    template: &str,
    formats: &FormatRegistry,
) -> Result<PathSegment> {
    match braced(segment) {
        Some(inner) => {
            let token = parse_param_token(inner, template, formats)?;
            if token.optional {
                return Err(RouteError::OptionalPathParam { name: token.name });
            }
            Ok(PathSegment::Param {
                name: token.name,
                format: token.format,
            })
        }
        None => Ok(PathSegment::Literal(segment.to_string())),
    }
}

/// Parses one `&`-separated query entry of a template
pub fn parse_query_entry(
    entry: &str,
    template: &str,
    formats: &FormatRegistry,
) -> Result<QueryParam> {
    let (key, raw_token) = match entry.split_once('=') {
        Some((key, token)) => (Some(key), token),
        None => (None, entry),
    };

    let inner = braced(raw_token).ok_or_else(|| RouteError::BareQueryToken {
        token: raw_token.to_string(),
    })?;
    let token = parse_param_token(inner, template, formats)?;

    Ok(QueryParam {
        key: key.map(str::to_string).unwrap_or_else(|| token.name.clone()),
        name: token.name,
        format: token.format,
        optional: token.optional,
    })
}

/// Splits a template into its path and query portions
///
/// Only a `?` outside `{...}` starts the query; `{id?}` stays in the path.
fn split_template(template: &str) -> (&str, &str) {
    let mut depth = 0usize;
    let split = template.char_indices().find(|&(_, c)| {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '?' if depth == 0 => return true,
            _ => {}
        }
        false
    });

    match split {
        Some((index, _)) => (&template[..index], &template[index + 1..]),
        None => (template, ""),
    }
}

/// Compiles only the path portion of a template
pub fn compile_path(template: &str, formats: &FormatRegistry) -> Result<Vec<PathSegment>> {
    let (path, _) = split_template(template);
    path.trim_start_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| classify_segment(segment, template, formats))
        .collect()
}

/// Compiles only the query portion of a template
pub fn compile_query(template: &str, formats: &FormatRegistry) -> Result<Vec<QueryParam>> {
    let (_, query) = split_template(template);
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|entry| parse_query_entry(entry, template, formats))
        .collect()
}

/// Compiles a full route template
///
/// Parameter names must be unique across path and query.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::{compile_template, FormatRegistry};
///
/// let compiled =
///     compile_template("/search?term={term}&page={page:integer?}", &FormatRegistry::new()).unwrap();
/// assert_eq!(compiled.depth(), 1);
/// assert_eq!(compiled.query.len(), 2);
/// assert!(compiled.query[1].optional);
///
/// assert!(compile_template("/users/{id?}", &FormatRegistry::new()).is_err());
/// ```
pub fn compile_template(template: &str, formats: &FormatRegistry) -> Result<CompiledTemplate> {
    let compiled = CompiledTemplate {
        template: template.to_string(),
        path: compile_path(template, formats)?,
        query: compile_query(template, formats)?,
    };

    compiled
        .param_names()
        .try_fold(HashSet::new(), |mut seen, name| {
            if seen.insert(name) {
                Ok(seen)
            } else {
                Err(RouteError::DuplicateParam {
                    name: name.to_string(),
                    template: template.to_string(),
                })
            }
        })?;

    Ok(compiled)
}
