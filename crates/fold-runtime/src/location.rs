#![forbid(unsafe_code)]

//! Page location as seen at mount time.
//!
//! Only the fragment matters here: a panel whose anchor id equals the
//! fragment opens itself when mounted. The fragment is taken verbatim,
//! without percent-decoding, and read once; later navigation is not
//! tracked.

/// Snapshot of the host page's URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    fragment: Option<String>,
}

impl Location {
    /// Parse a URL (absolute, relative, or a bare `#fragment`).
    ///
    /// ```
    /// use fold_runtime::Location;
    ///
    /// assert_eq!(Location::parse("https://x.dev/docs/cli#login").fragment(), Some("login"));
    /// assert_eq!(Location::parse("/docs/cli#").fragment(), None);
    /// assert_eq!(Location::parse("/docs/cli").fragment(), None);
    /// ```
    #[must_use]
    pub fn parse(url: &str) -> Self {
        let fragment = url
            .split_once('#')
            .map(|(_, frag)| frag)
            .filter(|frag| !frag.is_empty())
            .map(str::to_owned);
        Self { fragment }
    }

    /// Location whose fragment is `fragment` (a leading `#` is ignored).
    #[must_use]
    pub fn from_fragment(fragment: &str) -> Self {
        Self::parse(&format!("#{}", fragment.strip_prefix('#').unwrap_or(fragment)))
    }

    /// Location with no fragment.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Text after the first `#`, if any.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Whether the fragment equals `id`.
    #[must_use]
    pub fn targets(&self, id: &str) -> bool {
        self.fragment() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_after_first_hash() {
        let loc = Location::parse("https://example.com/a?b=c#one#two");
        assert_eq!(loc.fragment(), Some("one#two"));
    }

    #[test]
    fn empty_or_missing_fragment() {
        assert_eq!(Location::parse("").fragment(), None);
        assert_eq!(Location::parse("#").fragment(), None);
        assert_eq!(Location::none().fragment(), None);
    }

    #[test]
    fn from_fragment_strips_hash() {
        assert_eq!(Location::from_fragment("#deploy").fragment(), Some("deploy"));
        assert_eq!(Location::from_fragment("deploy").fragment(), Some("deploy"));
        assert_eq!(Location::from_fragment("").fragment(), None);
    }

    #[test]
    fn targets_is_exact() {
        let loc = Location::parse("/docs#Login");
        assert!(loc.targets("Login"));
        assert!(!loc.targets("login"));
        assert!(!Location::none().targets(""));
    }

    #[test]
    fn fragment_not_decoded() {
        let loc = Location::parse("/docs#env%20vars");
        assert_eq!(loc.fragment(), Some("env%20vars"));
    }
}
