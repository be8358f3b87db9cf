/// Errors raised while compiling route templates or building URLs
///
/// Every variant describes a malformed template or a malformed call.
/// A URL that simply doesn't match any route is not an error; matching
/// returns `None` for that.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Parameter token doesn't follow `name[:format][?]`
    #[error("invalid route parameter token `{token}` in `{template}`")]
    InvalidToken { token: String, template: String },

    /// `{name?}` used inside a path segment
    #[error("path parameters cannot be optional: `{name}`")]
    OptionalPathParam { name: String },

    /// Query entry whose value isn't wrapped in `{}`
    #[error("query parameters must use `{{}}` notation: `{token}`")]
    BareQueryToken { token: String },

    /// Format name that is neither builtin nor registered
    #[error("unsupported route parameter format: `{format}`")]
    UnsupportedFormat { format: String },

    /// Same parameter name declared twice in one template
    #[error("duplicate route parameter `{name}` in `{template}`")]
    DuplicateParam { name: String, template: String },

    #[error("missing value for path parameter: `{name}`")]
    MissingPathParam { name: String },

    #[error("missing value for query parameter: `{name}`")]
    MissingQueryParam { name: String },

    /// Custom format whose regular expression doesn't compile
    #[error("invalid pattern for route parameter format `{name}`")]
    InvalidFormatPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// Named-route lookup failed
    #[error("no route named `{name}`")]
    UnknownRoute { name: String },
}

/// Result alias used throughout the crate
pub type Result<T, E = RouteError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_parameter() {
        let err = RouteError::MissingPathParam {
            name: "userId".to_string(),
        };
        assert!(err.to_string().contains("userId"));

        let err = RouteError::MissingQueryParam {
            name: "page".to_string(),
        };
        assert_eq!(err.to_string(), "missing value for query parameter: `page`");
    }

    #[test]
    fn test_bare_query_message_escapes_braces() {
        let err = RouteError::BareQueryToken {
            token: "term".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "query parameters must use `{}` notation: `term`"
        );
    }
}
