//! Specificity ordering for compiled routes
//!
//! More constrained templates are tried first so that general ones don't
//! shadow them: `/users/{id}/posts/{postId}` before `/users/{id}/posts`
//! before `/users/{id}` before `/users`.

use std::cmp::{Ordering, Reverse};

use super::pattern::CompiledTemplate;

/// A compiled template remembering where its definition came from
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRoute {
    /// Position of the definition in the caller's input
    pub index: usize,
    pub template: CompiledTemplate,
}

/// Sort key: path depth desc, query count desc, input index asc
fn specificity_key(route: &CompiledRoute) -> (Reverse<usize>, Reverse<usize>, usize) {
    (
        Reverse(route.template.path.len()),
        Reverse(route.template.query.len()),
        route.index,
    )
}

/// Compares two routes by specificity (pure function)
///
/// `Ordering::Less` means `a` is tried before `b`. The original input
/// index is the final key, so the order is total.
pub fn compare_specificity(a: &CompiledRoute, b: &CompiledRoute) -> Ordering {
    specificity_key(a).cmp(&specificity_key(b))
}

/// Orders routes so the most specific is first
///
/// # Examples
///
/// ```
/// use rhtmx_routes::{compile_template, sort_by_specificity, CompiledRoute, FormatRegistry};
///
/// let formats = FormatRegistry::new();
/// let routes = ["/users", "/users/{id}", "/users/{id}/posts"]
///     .iter()
///     .enumerate()
///     .map(|(index, t)| CompiledRoute { index, template: compile_template(t, &formats).unwrap() })
///     .collect();
///
/// let order: Vec<usize> = sort_by_specificity(routes).iter().map(|r| r.index).collect();
/// assert_eq!(order, vec![2, 1, 0]);
/// ```
pub fn sort_by_specificity(mut routes: Vec<CompiledRoute>) -> Vec<CompiledRoute> {
    routes.sort_by(compare_specificity);
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::format::FormatRegistry;
    use crate::route::pattern::compile_template;
    use pretty_assertions::assert_eq;

    fn compiled(templates: &[&str]) -> Vec<CompiledRoute> {
        let formats = FormatRegistry::new();
        templates
            .iter()
            .enumerate()
            .map(|(index, template)| CompiledRoute {
                index,
                template: compile_template(template, &formats).unwrap(),
            })
            .collect()
    }

    fn order(templates: &[&str]) -> Vec<String> {
        sort_by_specificity(compiled(templates))
            .into_iter()
            .map(|r| r.template.template)
            .collect()
    }

    #[test]
    fn test_deeper_routes_first() {
        assert_eq!(
            order(&["/users", "/users/{id}", "/users/{id}/posts/{postId}", "/users/{id}/posts"]),
            vec![
                "/users/{id}/posts/{postId}",
                "/users/{id}/posts",
                "/users/{id}",
                "/users"
            ]
        );
    }

    #[test]
    fn test_query_count_breaks_ties() {
        assert_eq!(
            order(&["/search", "/search?q={q}", "/search?q={q}&page={page?}"]),
            vec!["/search?q={q}&page={page?}", "/search?q={q}", "/search"]
        );
    }

    #[test]
    fn test_equal_specificity_keeps_input_order() {
        assert_eq!(
            order(&["/users/{id}", "/users/new", "/posts/{slug}"]),
            vec!["/users/{id}", "/users/new", "/posts/{slug}"]
        );
        assert_eq!(
            order(&["/users/new", "/users/{id}"]),
            vec!["/users/new", "/users/{id}"]
        );
    }

    #[test]
    fn test_order_is_total() {
        let routes = compiled(&["/a", "/b"]);
        assert_eq!(compare_specificity(&routes[0], &routes[1]), Ordering::Less);
        assert_eq!(compare_specificity(&routes[1], &routes[0]), Ordering::Greater);
        assert_eq!(compare_specificity(&routes[0], &routes[0]), Ordering::Equal);
    }
}
