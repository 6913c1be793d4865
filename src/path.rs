//! Segment-aligned path prefixes.
//!
//! Every pipeline entry is scoped to a [`Prefix`]. Matching is never a raw
//! string-prefix test: `/foo` matches `/foo`, `/foo/` and `/foo/bar`, but
//! not `/foobar`.
//!
//! | prefix  | request path | matches | path handed down |
//! |---------|--------------|---------|------------------|
//! | `""`    | `/anything`  | yes     | `/anything`      |
//! | `/foo`  | `/foo`       | yes     | `/`              |
//! | `foo/`  | `/foo/`      | yes     | `/`              |
//! | `/foo/` | `/foo/bar/`  | yes     | `/bar/`          |
//! | `/foo`  | `/foo//bar`  | yes     | `/bar`           |
//! | `/foo`  | `/foobar`    | no      |                  |

use std::fmt;

/// A canonical path prefix.
///
/// `""` and `"/"` both denote the root prefix, which matches every path and
/// never rewrites it. Any other input loses a single trailing `/` and gains
/// a leading one, so `foo`, `/foo` and `/foo/` are the same prefix.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Prefix {
    // `None` is the root prefix.
    canonical: Option<String>,
}

impl Prefix {
    /// The root prefix.
    pub fn root() -> Self {
        Self { canonical: None }
    }

    /// Canonicalises a raw prefix string.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.strip_suffix('/').unwrap_or(raw);
        let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Self::root();
        }
        Self { canonical: Some(format!("/{trimmed}")) }
    }

    pub fn is_root(&self) -> bool {
        self.canonical.is_none()
    }

    /// The canonical form; `/` for the root prefix.
    pub fn as_str(&self) -> &str {
        self.canonical.as_deref().unwrap_or("/")
    }

    /// Whether this prefix applies to `path`.
    pub fn matches(&self, path: &str) -> bool {
        self.strip(path).is_some()
    }

    /// Removes the prefix from `path`, returning the path to hand to the
    /// scoped handler, or `None` when the prefix does not apply.
    ///
    /// The remainder always starts with exactly one `/`: empty segments
    /// right after the prefix collapse, so `/foo//bar` against `/foo` yields
    /// `/bar`. A trailing slash present in `path` is preserved, so `/foo/`
    /// against `/foo` yields `/`.
    pub fn strip<'p>(&self, path: &'p str) -> Option<&'p str> {
        let Some(prefix) = self.canonical.as_deref() else {
            return Some(path);
        };
        let rest = path.strip_prefix(prefix)?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with('/') {
            let segments = rest.trim_start_matches('/');
            Some(&rest[rest.len() - segments.len() - 1..])
        } else {
            None
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Prefix {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Prefix {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

/// Normalises a request path so it always begins with `/`.
///
/// Trailing slashes are left alone; they are meaningful to matching.
pub(crate) fn normalize(path: &str) -> String {
    if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_slash_are_root() {
        assert!(Prefix::new("").is_root());
        assert!(Prefix::new("/").is_root());
        assert_eq!(Prefix::new(""), Prefix::root());
    }

    #[test]
    fn spellings_share_one_canonical_form() {
        for raw in ["foo", "foo/", "/foo", "/foo/"] {
            assert_eq!(Prefix::new(raw).as_str(), "/foo", "raw prefix {raw:?}");
        }
    }

    #[test]
    fn only_one_trailing_slash_is_stripped() {
        assert_eq!(Prefix::new("/foo//").as_str(), "/foo/");
        assert_eq!(Prefix::new("/foo/bar/").as_str(), "/foo/bar");
    }

    #[test]
    fn root_passes_path_through() {
        let root = Prefix::root();
        assert_eq!(root.strip("/"), Some("/"));
        assert_eq!(root.strip("/foo/bar/"), Some("/foo/bar/"));
    }

    #[test]
    fn match_is_segment_aligned() {
        let foo = Prefix::new("/foo");
        assert_eq!(foo.strip("/foo"), Some("/"));
        assert_eq!(foo.strip("/foo/"), Some("/"));
        assert_eq!(foo.strip("/foo/bar"), Some("/bar"));
        assert_eq!(foo.strip("/foo/bar/"), Some("/bar/"));
        assert_eq!(foo.strip("/foo//bar"), Some("/bar"));
        assert_eq!(foo.strip("/foobar"), None);
        assert_eq!(foo.strip("/fo"), None);
        assert_eq!(foo.strip("/"), None);
        assert_eq!(foo.strip("/bar/foo"), None);
    }

    #[test]
    fn empty_segments_after_prefix_collapse() {
        let foo = Prefix::new("/foo");
        assert_eq!(foo.strip("/foo//bar"), Some("/bar"));
        assert_eq!(foo.strip("/foo///bar/"), Some("/bar/"));
        assert_eq!(foo.strip("/foo//"), Some("/"));
        assert_eq!(foo.strip("/foo/bar//baz"), Some("/bar//baz"));
    }

    #[test]
    fn normalize_adds_leading_slash() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("foo"), "/foo");
        assert_eq!(normalize("/foo/"), "/foo/");
    }
}
