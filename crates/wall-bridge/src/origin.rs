//! Origin handling for the direct-message trust boundary.

use url::Url;

/// ASCII serialization of a URL's origin (`scheme://host[:port]`).
///
/// Returns `None` for URLs with an opaque origin (`data:`, `about:blank`,
/// unparseable input).
pub fn origin_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let origin = parsed.origin();
    if origin.is_tuple() {
        Some(origin.ascii_serialization())
    } else {
        None
    }
}

/// Exact-match list of origins whose direct messages are accepted.
#[derive(Debug, Clone)]
pub struct OriginAllowList {
    allowed: Vec<String>,
}

impl OriginAllowList {
    /// Accept only messages from `origin` itself.
    pub fn same_origin(origin: impl Into<String>) -> Self {
        Self {
            allowed: vec![origin.into()],
        }
    }

    /// Check a sender origin. Comparison is exact; the opaque `"null"`
    /// origin is never accepted.
    pub fn is_allowed(&self, origin: &str) -> bool {
        origin != "null" && self.allowed.iter().any(|a| a == origin)
    }
}
