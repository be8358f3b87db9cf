//! Matching URLs against compiled route templates
//!
//! Matching is prefix-based: a route consumes exactly its own path
//! segments and declared query keys. Whatever is left over (extra
//! segments, undeclared query pairs, the hash) is returned as
//! `unused_path` so nested routers can keep matching it.

use std::borrow::Cow;

use crate::config::RouterConfig;
use crate::error::Result;
use crate::route::{
    compile_template, sort_by_specificity, CompiledRoute, CompiledTemplate, FormatRegistry,
    PathSegment,
};
use crate::path::{decode_segment, dissect, join_unused, parse_query, serialize_query, UrlParts};
use crate::Params;

/// Anything that carries a route template
///
/// The engine only reads the template; any other payload (handlers,
/// titles, permissions) rides along untouched and is handed back in
/// [`RouteMatch::definition`].
pub trait RouteDefinition {
    /// Route template such as `/users/{id:integer}`
    fn path(&self) -> &str;
}

impl RouteDefinition for str {
    fn path(&self) -> &str {
        self
    }
}

impl RouteDefinition for String {
    fn path(&self) -> &str {
        self
    }
}

impl<T: RouteDefinition + ?Sized> RouteDefinition for &T {
    fn path(&self) -> &str {
        (**self).path()
    }
}

/// Result of matching a URL
///
/// A fresh value is built for every call, so two matches of the same URL
/// compare equal without sharing anything.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<'a, D> {
    /// Definition whose template matched
    pub definition: &'a D,
    /// Decoded path and query parameters
    pub params: Params,
    /// Unconsumed path segments, query pairs and hash
    pub unused_path: String,
}

impl<D> RouteMatch<'_, D> {
    /// Gets a parameter value by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Whether the whole URL was consumed
    pub fn is_exact(&self) -> bool {
        self.unused_path.is_empty()
    }
}

/// Compiles every definition and orders them by specificity
pub fn compile_definitions<D: RouteDefinition>(
    definitions: &[D],
    formats: &FormatRegistry,
) -> Result<Vec<CompiledRoute>> {
    let routes = definitions
        .iter()
        .enumerate()
        .map(|(index, definition)| {
            compile_template(definition.path(), formats)
                .map(|template| CompiledRoute { index, template })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(sort_by_specificity(routes))
}

/// Reusable matcher over a fixed set of route definitions
///
/// Templates are compiled and sorted once; [`RouteMatcher::match_url`]
/// only reads that state, so a matcher can be shared freely between
/// threads.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::RouteMatcher;
///
/// let matcher = RouteMatcher::new(vec!["/users", "/users/{id:integer}"]).unwrap();
///
/// let m = matcher.match_url("/users/42/settings").unwrap();
/// assert_eq!(*m.definition, "/users/{id:integer}");
/// assert_eq!(m.param("id"), Some("42"));
/// assert_eq!(m.unused_path, "/settings");
///
/// assert!(matcher.match_url("/posts").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RouteMatcher<D> {
    definitions: Vec<D>,
    routes: Vec<CompiledRoute>,
    case_insensitive: bool,
}

impl<D: RouteDefinition> RouteMatcher<D> {
    /// Creates a case-sensitive matcher using builtin formats only
    pub fn new(definitions: Vec<D>) -> Result<Self> {
        Self::with_formats(definitions, &FormatRegistry::new())
    }

    /// Creates a matcher that also understands custom format names
    pub fn with_formats(definitions: Vec<D>, formats: &FormatRegistry) -> Result<Self> {
        let routes = compile_definitions(&definitions, formats)?;
        tracing::debug!(routes = routes.len(), "compiled route matcher");

        Ok(Self {
            definitions,
            routes,
            case_insensitive: false,
        })
    }

    /// Creates a matcher from routing configuration
    pub fn with_config(definitions: Vec<D>, config: &RouterConfig) -> Result<Self> {
        let formats = config.format_registry()?;
        Ok(Self::with_formats(definitions, &formats)?.with_case_insensitive(config.case_insensitive))
    }

    /// Configures ASCII case-insensitive literal matching (functional builder)
    ///
    /// Parameter values are never case-folded.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_routes::RouteMatcher;
    ///
    /// let matcher = RouteMatcher::new(vec!["/About"]).unwrap().with_case_insensitive(true);
    /// assert!(matcher.match_url("/about").is_some());
    /// ```
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Matches a URL and returns the first (most specific) hit
    pub fn match_url(&self, url: &str) -> Option<RouteMatch<'_, D>> {
        match_compiled(&self.definitions, &self.routes, url, self.case_insensitive)
    }

    /// Compiled routes in matching order
    pub fn routes(&self) -> &[CompiledRoute] {
        &self.routes
    }

    /// Definitions in the order they were supplied
    pub fn definitions(&self) -> &[D] {
        &self.definitions
    }
}

/// Builds a reusable matcher (alias of [`RouteMatcher::new`])
pub fn compile_routes<D: RouteDefinition>(definitions: Vec<D>) -> Result<RouteMatcher<D>> {
    RouteMatcher::new(definitions)
}

/// Compiles `definitions` and matches `url` once
///
/// Recompiles on every call; keep a [`RouteMatcher`] for hot paths.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::match_route;
///
/// let routes = ["/users/{userId:integer}"];
///
/// let m = match_route("/users/42", &routes).unwrap().unwrap();
/// assert_eq!(m.param("userId"), Some("42"));
/// assert_eq!(m.unused_path, "");
///
/// assert!(match_route("/users/not-a-number", &routes).unwrap().is_none());
/// ```
pub fn match_route<'a, D: RouteDefinition>(
    url: &str,
    definitions: &'a [D],
) -> Result<Option<RouteMatch<'a, D>>> {
    let routes = compile_definitions(definitions, &FormatRegistry::new())?;
    Ok(match_compiled(definitions, &routes, url, false))
}

fn match_compiled<'a, D>(
    definitions: &'a [D],
    routes: &[CompiledRoute],
    url: &str,
    case_insensitive: bool,
) -> Option<RouteMatch<'a, D>> {
    let parts = dissect(url);

    let found = routes.iter().find_map(|route| {
        match_template(&route.template, &parts, case_insensitive).map(|(params, unused_path)| {
            RouteMatch {
                definition: &definitions[route.index],
                params,
                unused_path,
            }
        })
    });

    match &found {
        Some(m) => tracing::trace!(url, params = m.params.len(), "route matched"),
        None => tracing::trace!(url, "no route matched"),
    }

    found
}

/// Matches one template against a dissected URL
///
/// Returns the bound parameters and the unused remainder, or `None` as
/// soon as any segment or query value is rejected.
pub fn match_template(
    template: &CompiledTemplate,
    parts: &UrlParts<'_>,
    case_insensitive: bool,
) -> Option<(Params, String)> {
    if template.path.len() > parts.segments.len() {
        return None;
    }

    let mut params = template
        .path
        .iter()
        .zip(&parts.segments)
        .try_fold(Params::new(), |mut params, (segment, raw)| {
            let decoded = decode_segment(raw);
            match segment {
                PathSegment::Literal(literal) => {
                    let matches = if case_insensitive {
                        literal.eq_ignore_ascii_case(&decoded)
                    } else {
                        literal.as_str() == decoded.as_ref()
                    };
                    matches.then_some(params)
                }
                PathSegment::Param { name, format } => {
                    if !format.validate(&decoded) {
                        tracing::trace!(param = %name, format = format.name(), "path value rejected");
                        return None;
                    }
                    params.insert(name.clone(), decoded.into_owned());
                    Some(params)
                }
            }
        })?;

    let unused_query: Cow<'_, str> = if template.query.is_empty() {
        Cow::Borrowed(parts.query)
    } else {
        let mut pairs = parse_query(parts.query);

        for param in &template.query {
            let value = pairs
                .iter()
                .find(|(key, _)| *key == param.key)
                .map(|(_, value)| value.clone());

            match value {
                None if param.optional => continue,
                None => return None,
                Some(value) => {
                    if !param.format.validate(&value) {
                        tracing::trace!(param = %param.name, format = param.format.name(), "query value rejected");
                        return None;
                    }
                    pairs.retain(|(key, _)| *key != param.key);
                    params.insert(param.name.clone(), value);
                }
            }
        }

        Cow::Owned(serialize_query(&pairs))
    };

    let remaining = &parts.segments[template.path.len()..];
    Some((params, join_unused(remaining, &unused_query, parts.hash)))
}
