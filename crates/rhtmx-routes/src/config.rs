// File: src/config.rs
// Purpose: Route table configuration parsing from routes.toml

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::build_route_with;
use crate::error::RouteError;
use crate::matcher::{RouteDefinition, RouteMatcher};
use crate::route::FormatRegistry;
use crate::Params;

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RouterConfig {
    /// Whether literal segments match ASCII case-insensitively (default: false)
    #[serde(default)]
    pub case_insensitive: bool,

    /// Custom parameter formats: format name → regular expression
    #[serde(default)]
    pub formats: HashMap<String, String>,
}

impl RouterConfig {
    /// Compiles the configured custom formats
    pub fn format_registry(&self) -> crate::Result<FormatRegistry> {
        self.formats
            .iter()
            .try_fold(FormatRegistry::new(), |registry, (name, pattern)| {
                registry.with_pattern(name.clone(), pattern)
            })
    }
}

/// One route declared in a route table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Route template such as `/users/{id:integer}`
    pub path: String,

    /// Optional name for URL generation
    #[serde(default)]
    pub name: Option<String>,

    /// Arbitrary metadata (titles, permissions, cache settings, etc.)
    #[serde(default)]
    pub meta: HashMap<String, String>,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            meta: HashMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn get_meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }
}

impl RouteDefinition for RouteEntry {
    fn path(&self) -> &str {
        &self.path
    }
}

/// Route table loaded from TOML
///
/// ```toml
/// [routing]
/// case_insensitive = false
///
/// [routing.formats]
/// slug = "^[a-z0-9-]+$"
///
/// [[routes]]
/// path = "/users/{id:integer}"
/// name = "user.profile"
///
/// [routes.meta]
/// title = "User profile"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RouteTable {
    #[serde(default)]
    pub routing: RouterConfig,

    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

impl RouteTable {
    /// Load a route table from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read route table: {}", path.display()))?;

        let table = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse route table: {}", path.display()))?;

        tracing::debug!(path = %path.display(), routes = table.routes.len(), "loaded route table");
        Ok(table)
    }

    /// Parse a route table from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: RouteTable = toml::from_str(content).context("Invalid route table TOML")?;
        Ok(table)
    }

    /// Load from file, or fall back to an empty table if it doesn't exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Compiles the table into a matcher over borrowed entries
    pub fn matcher(&self) -> crate::Result<RouteMatcher<&RouteEntry>> {
        RouteMatcher::with_config(self.routes.iter().collect(), &self.routing)
    }

    /// Finds a route by name
    pub fn route_by_name(&self, name: &str) -> Option<&RouteEntry> {
        self.routes
            .iter()
            .find(|route| route.name.as_deref() == Some(name))
    }

    /// Generates a URL for a named route
    pub fn url_for(&self, name: &str, params: &Params, suffix: Option<&str>) -> crate::Result<String> {
        let route = self
            .route_by_name(name)
            .ok_or_else(|| RouteError::UnknownRoute {
                name: name.to_string(),
            })?;
        build_route_with(&route.path, params, suffix, &self.routing.format_registry()?)
    }
}
