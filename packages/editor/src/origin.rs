//! Resolution of the embedding parent's origin.
//!
//! Browsers expose the parent origin in two places. `location.ancestorOrigins`
//! is exact but Chromium-only; `document.referrer` is universal but carries a
//! full URL that has to be reduced to its origin.

use url::Url;

/// Resolve the parent origin from the first ancestor origin, falling back
/// to the origin of the referrer.
///
/// Empty strings count as absent. A referrer that is not a valid URL is
/// logged and ignored.
pub fn resolve_parent_origin(ancestor_origin: Option<&str>, referrer: Option<&str>) -> Option<String> {
    if let Some(origin) = ancestor_origin.filter(|o| !o.is_empty()) {
        return Some(origin.to_string());
    }

    let referrer = referrer.filter(|r| !r.is_empty())?;
    match Url::parse(referrer) {
        Ok(url) => Some(url.origin().ascii_serialization()),
        Err(e) => {
            tracing::warn!("Invalid referrer URL {referrer}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ancestor_origin_wins() {
        assert_eq!(
            resolve_parent_origin(
                Some("https://horizons.hostinger.dev"),
                Some("https://horizons.hostinger.com/project/42")
            ),
            Some("https://horizons.hostinger.dev".to_string())
        );
    }

    #[test]
    fn test_referrer_is_reduced_to_origin() {
        assert_eq!(
            resolve_parent_origin(None, Some("https://horizons.hostinger.com/project/42?tab=1")),
            Some("https://horizons.hostinger.com".to_string())
        );
        assert_eq!(
            resolve_parent_origin(Some(""), Some("http://localhost:4000/")),
            Some("http://localhost:4000".to_string())
        );
    }

    #[test]
    fn test_default_port_is_dropped() {
        assert_eq!(
            resolve_parent_origin(None, Some("https://horizons.hostinger.com:443/x")),
            Some("https://horizons.hostinger.com".to_string())
        );
    }

    #[test]
    fn test_missing_or_invalid() {
        assert_eq!(resolve_parent_origin(None, None), None);
        assert_eq!(resolve_parent_origin(None, Some("")), None);
        assert_eq!(resolve_parent_origin(None, Some("not a url")), None);
    }
}
