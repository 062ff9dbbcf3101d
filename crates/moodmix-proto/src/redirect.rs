//! Parsing of the URL the backend redirects back to after `/login`.
//!
//! The backend appends either nothing or a fragment such as
//! `#error=access_denied`. Only the `error` key is meaningful to the client.

/// Extract the fragment from a full URL, a bare `#fragment`, or a raw
/// `key=value&...` string.
pub fn fragment_of(launch: &str) -> &str {
    match launch.split_once('#') {
        Some((_, frag)) => frag,
        None if launch.contains("://") || launch.starts_with('/') => "",
        None => launch,
    }
}

/// Value of `error` in the redirect fragment, if present and non-empty.
pub fn redirect_error(launch: &str) -> Option<&str> {
    fragment_of(launch)
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == "error")
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_in_full_url() {
        assert_eq!(
            redirect_error("http://localhost:5173/#error=access_denied"),
            Some("access_denied")
        );
    }

    #[test]
    fn test_error_among_other_pairs() {
        assert_eq!(redirect_error("#state=abc&error=invalid_state"), Some("invalid_state"));
        assert_eq!(redirect_error("state=abc&error=x"), Some("x"));
    }

    #[test]
    fn test_no_error() {
        assert_eq!(redirect_error("http://localhost:5173/"), None);
        assert_eq!(redirect_error("http://localhost:5173/?error=query_only"), None);
        assert_eq!(redirect_error("#"), None);
        assert_eq!(redirect_error(""), None);
        assert_eq!(redirect_error("#state=abc"), None);
    }

    #[test]
    fn test_empty_error_value_is_ignored() {
        assert_eq!(redirect_error("#error="), None);
        assert_eq!(redirect_error("#error"), None);
    }
}
