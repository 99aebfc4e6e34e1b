//! Profile request router.
//!
//! The route table is fixed and small:
//!
//! ```text
//! POST   /profile       -> PostProfile
//! GET    /profile/{id}  -> GetProfile
//! DELETE /profile/{id}  -> DeleteProfile
//! ```
//!
//! Patterns are `/`-separated segments; a `{name}` segment captures exactly
//! one non-empty path segment, which is percent-decoded.

use percent_encoding::percent_decode_str;
use profilesvc_model::error::ProfileError;
use profilesvc_model::operations::ProfileOperation;

/// One entry of the route table.
#[derive(Debug, Clone, Copy)]
struct Route {
    method: &'static str,
    pattern: &'static str,
    operation: ProfileOperation,
}

const ROUTES: &[Route] = &[
    Route {
        method: "POST",
        pattern: "/profile",
        operation: ProfileOperation::PostProfile,
    },
    Route {
        method: "GET",
        pattern: "/profile/{id}",
        operation: ProfileOperation::GetProfile,
    },
    Route {
        method: "DELETE",
        pattern: "/profile/{id}",
        operation: ProfileOperation::DeleteProfile,
    },
];

/// Values captured from `{name}` segments of the matched pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(&'static str, String)>);

impl PathParams {
    /// Look up a captured value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Add a capture. Later inserts do not shadow earlier ones.
    pub fn insert(&mut self, name: &'static str, value: impl Into<String>) {
        self.0.push((name, value.into()));
    }

    /// Whether nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The result of routing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingContext {
    /// The matched operation.
    pub operation: ProfileOperation,
    /// Captured path parameters.
    pub params: PathParams,
}

/// Resolve a request method and path to an operation.
///
/// # Errors
///
/// Returns `RouteNotFound` if no pattern matches the path, or
/// `MethodNotAllowed` if a pattern matches but only under other methods
/// (see [`allowed_methods`]).
pub fn resolve_route(
    method: &http::Method,
    path: &str,
) -> Result<RoutingContext, ProfileError> {
    let mut path_matched = false;

    for route in ROUTES {
        let Some(params) = match_pattern(route.pattern, path) else {
            continue;
        };
        if route.method == method.as_str() {
            return Ok(RoutingContext {
                operation: route.operation,
                params,
            });
        }
        path_matched = true;
    }

    if path_matched {
        Err(ProfileError::method_not_allowed(method))
    } else {
        Err(ProfileError::route_not_found(path))
    }
}

/// Methods that have a route for `path`, in table order.
#[must_use]
pub fn allowed_methods(path: &str) -> Vec<&'static str> {
    let mut methods: Vec<&'static str> = Vec::new();
    for route in ROUTES {
        if match_pattern(route.pattern, path).is_some() && !methods.contains(&route.method) {
            methods.push(route.method);
        }
    }
    methods
}

/// Match `path` against `pattern`, returning the captures on success.
fn match_pattern(pattern: &'static str, path: &str) -> Option<PathParams> {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    let mut params = PathParams::default();

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(params),
            (Some(pat), Some(seg)) => {
                if let Some(name) = pat.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                    if seg.is_empty() {
                        return None;
                    }
                    params.insert(name, decode_segment(seg));
                } else if pat != seg {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

fn decode_segment(seg: &str) -> String {
    percent_decode_str(seg).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use profilesvc_model::error::ProfileErrorCode;

    #[test]
    fn test_should_resolve_post_profile() {
        let ctx = resolve_route(&http::Method::POST, "/profile").unwrap();
        assert_eq!(ctx.operation, ProfileOperation::PostProfile);
        assert!(ctx.params.is_empty());
    }

    #[test]
    fn test_should_resolve_get_and_delete_with_id() {
        let ops = [
            (http::Method::GET, ProfileOperation::GetProfile),
            (http::Method::DELETE, ProfileOperation::DeleteProfile),
        ];
        for (method, expected) in ops {
            let ctx = resolve_route(&method, "/profile/42").unwrap();
            assert_eq!(ctx.operation, expected, "failed for method: {method}");
            assert_eq!(ctx.params.get("id"), Some("42"));
        }
    }

    #[test]
    fn test_should_percent_decode_captures() {
        let ctx = resolve_route(&http::Method::GET, "/profile/a%20b").unwrap();
        assert_eq!(ctx.params.get("id"), Some("a b"));
    }

    #[test]
    fn test_should_error_on_unknown_path() {
        for path in ["/", "/profiles", "/profile/1/extra", "/profile/", "/other/1"] {
            let err = resolve_route(&http::Method::GET, path).unwrap_err();
            assert_eq!(err.code, ProfileErrorCode::RouteNotFound, "path: {path}");
            assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_should_error_on_wrong_method() {
        let err = resolve_route(&http::Method::PUT, "/profile/1").unwrap_err();
        assert_eq!(err.code, ProfileErrorCode::MethodNotAllowed);

        let err = resolve_route(&http::Method::GET, "/profile").unwrap_err();
        assert_eq!(err.code, ProfileErrorCode::MethodNotAllowed);
    }

    #[test]
    fn test_should_list_allowed_methods() {
        assert_eq!(allowed_methods("/profile/7"), vec!["GET", "DELETE"]);
        assert_eq!(allowed_methods("/profile"), vec!["POST"]);
        assert!(allowed_methods("/nothing").is_empty());
    }
}
