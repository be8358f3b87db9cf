//! URL generation from route templates
//!
//! The inverse of matching: substitutes parameter values into a template,
//! percent-encoding them, and appends an optional unused-path suffix.

use crate::error::{Result, RouteError};
use crate::route::{compile_template, FormatRegistry, PathSegment};
use crate::Params;

/// Builds a concrete URL from a template and parameter values
///
/// # Examples
///
/// ```
/// use rhtmx_routes::{build_route, Params};
///
/// let mut params = Params::new();
/// params.insert("name".to_string(), "file with spaces.txt".to_string());
///
/// let url = build_route("/files/{name}", &params, None).unwrap();
/// assert_eq!(url, "/files/file%20with%20spaces.txt");
///
/// let url = build_route("/files/{name}", &params, Some("#preview")).unwrap();
/// assert_eq!(url, "/files/file%20with%20spaces.txt#preview");
/// ```
pub fn build_route(template: &str, params: &Params, suffix: Option<&str>) -> Result<String> {
    build_route_with(template, params, suffix, &FormatRegistry::new())
}

/// Builds a URL from a template that may use custom format names
pub fn build_route_with(
    template: &str,
    params: &Params,
    suffix: Option<&str>,
    formats: &FormatRegistry,
) -> Result<String> {
    let compiled = compile_template(template, formats)?;

    let segments = compiled
        .path
        .iter()
        .map(|segment| match segment {
            PathSegment::Literal(literal) => Ok(literal.clone()),
            PathSegment::Param { name, .. } => params
                .get(name)
                .map(|value| urlencoding::encode(value).into_owned())
                .ok_or_else(|| RouteError::MissingPathParam { name: name.clone() }),
        })
        .collect::<Result<Vec<_>>>()?;

    let mut url = format!("/{}", segments.join("/"));
    if url.len() > 1 && url.ends_with('/') {
        url.pop();
    }

    // Template order, never the map's iteration order
    let mut query = Vec::with_capacity(compiled.query.len());
    for param in &compiled.query {
        match params.get(&param.name) {
            Some(value) => query.push(format!(
                "{}={}",
                urlencoding::encode(&param.key),
                urlencoding::encode(value)
            )),
            None if param.optional => {}
            None => {
                return Err(RouteError::MissingQueryParam {
                    name: param.name.clone(),
                })
            }
        }
    }

    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.join("&"));
    }

    if let Some(suffix) = suffix.filter(|s| !s.is_empty()) {
        if !suffix.starts_with(['/', '?', '#']) {
            url.push('/');
        }
        url.push_str(suffix);
    }

    Ok(url)
}

/// Builds a URL from `(name, value)` pairs
///
/// # Examples
///
/// ```
/// use rhtmx_routes::build_route_params;
///
/// let url = build_route_params("/users/{id}/posts/{post}", &[("id", "7"), ("post", "12")]).unwrap();
/// assert_eq!(url, "/users/7/posts/12");
/// ```
pub fn build_route_params(template: &str, params: &[(&str, &str)]) -> Result<String> {
    let params: Params = params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    build_route(template, &params, None)
}
