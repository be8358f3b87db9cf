//! # RHTMX Routes
//!
//! A framework-agnostic route template engine with support for:
//! - Literal and parameter segments (`/users/{id}`)
//! - Typed parameters (`{id:integer}`, `{price:number}`, `{key:uuid}`, custom regex formats)
//! - Query parameters, required or optional (`/search?term={term}&page={page:integer?}`)
//! - Specificity ordering (deeper routes are tried first)
//! - Prefix matching with leftover `unused_path` for nested routing
//! - URL building, the inverse of matching
//!
//! ## Functional Programming Approach
//!
//! - **Pure functions**: compiling, sorting, matching and building have no side effects
//! - **Immutable compiled state**: a [`RouteMatcher`] never changes after construction
//! - **Functional composition** with `find_map()` / `try_fold()`
//! - **Zero-copy decoding** with `Cow<'_, str>` for segments that need no decoding
//!
//! ## Example
//!
//! ```
//! use rhtmx_routes::{build_route_params, RouteMatcher};
//!
//! let matcher = RouteMatcher::new(vec![
//!     "/users",
//!     "/users/{id:integer}",
//!     "/search?term={term}&page={page:integer?}",
//! ])
//! .unwrap();
//!
//! let m = matcher.match_url("/users/42").unwrap();
//! assert_eq!(m.param("id"), Some("42"));
//!
//! let m = matcher.match_url("/search?term=hello").unwrap();
//! assert_eq!(m.param("term"), Some("hello"));
//! assert_eq!(m.param("page"), None);
//!
//! let url = build_route_params("/users/{id:integer}", &[("id", "7")]).unwrap();
//! assert_eq!(url, "/users/7");
//! ```

use std::collections::HashMap;

// ============================================================================
// Module Declarations
// ============================================================================

mod builder;
pub mod config;
mod error;
mod matcher;
pub mod path;
pub mod route;

// ============================================================================
// Public API
// ============================================================================

pub use builder::{build_route, build_route_params, build_route_with};
pub use config::{RouteEntry, RouteTable, RouterConfig};
pub use error::{Result, RouteError};
pub use matcher::{
    compile_definitions, compile_routes, match_route, match_template, RouteDefinition,
    RouteMatch, RouteMatcher,
};
pub use route::{
    compare_specificity, compile_template, parse_param_token, sort_by_specificity, CompiledRoute,
    CompiledTemplate, FormatRegistry, ParamFormat, ParamToken, PathSegment, QueryParam,
};

/// Parameter bag: parameter name → decoded string value
pub type Params = HashMap<String, String>;
