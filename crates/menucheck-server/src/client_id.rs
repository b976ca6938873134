//! Client identity for rate limiting

use axum::http::HeaderMap;

/// Bucket used when no client header is present
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Derive the client identifier from proxy headers
///
/// The first entry of `x-forwarded-for` wins, then `x-real-ip`, then the
/// shared `unknown` bucket.
pub fn client_identifier(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    if let Some(forwarded) = header("x-forwarded-for") {
        let first = forwarded.split(',').next().unwrap_or("").trim();
        return if first.is_empty() {
            UNKNOWN_CLIENT.to_string()
        } else {
            first.to_string()
        };
    }

    header("x-real-ip")
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_forwarded_for_first_entry() {
        let map = headers(&[
            ("x-forwarded-for", " 203.0.113.7 , 10.0.0.1"),
            ("x-real-ip", "10.0.0.2"),
        ]);
        assert_eq!(client_identifier(&map), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_fallback() {
        let map = headers(&[("x-real-ip", "198.51.100.4")]);
        assert_eq!(client_identifier(&map), "198.51.100.4");
    }

    #[test]
    fn test_unknown_bucket() {
        assert_eq!(client_identifier(&HeaderMap::new()), "unknown");
        assert_eq!(client_identifier(&headers(&[("x-forwarded-for", ", 10.0.0.1")])), "unknown");
    }
}
