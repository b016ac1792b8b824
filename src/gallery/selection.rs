//! Picking the animation to show first.
//!
//! Accepts what a page URL would carry, `?animation=3` or `animation=aurora`,
//! as well as a bare value such as `3` or `aurora`.

use std::str::FromStr;

use url::form_urlencoded;

use crate::animations::AnimationRegistry;

const PARAMETER: &str = "animation";

/// How the first animation was asked for
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnimationSelector {
    /// Nothing was asked for, show the first animation
    #[default]
    First,
    /// 1-based position in the registry
    Index(usize),
    /// Case-insensitive substring of the title
    Title(String),
}

impl AnimationSelector {
    /// Read the `animation` parameter from a query string, decoding `+` and `%XX` escapes.
    /// Other parameters are ignored, and a missing or empty value selects the first animation.
    pub fn from_query(query: &str) -> Self {
        form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .find(|(key, _)| key == PARAMETER)
            .map(|(_, value)| Self::from_value(&value))
            .unwrap_or_default()
    }

    /// Interpret a bare value, numbers are indices and anything else a title
    pub fn from_value(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return Self::First;
        }
        match value.parse::<usize>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Title(value.to_owned()),
        }
    }

    /// The 0-based registry index to show, falling back to the first animation
    pub fn resolve(&self, registry: &AnimationRegistry) -> usize {
        match self {
            Self::First => 0,
            Self::Index(index) => match index.checked_sub(1) {
                Some(idx) if idx < registry.len() => idx,
                _ => 0,
            },
            Self::Title(title) => registry.find_by_title(title).unwrap_or(0),
        }
    }
}

impl FromStr for AnimationSelector {
    type Err = std::convert::Infallible;

    /// Anything containing `=` is read as a query, otherwise as a bare value
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains('=') {
            Ok(Self::from_query(s))
        } else {
            Ok(Self::from_value(s))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        assert_eq!(
            AnimationSelector::from_query("?animation=3"),
            AnimationSelector::Index(3)
        );
        assert_eq!(
            AnimationSelector::from_query("?debug=1&animation=aurora"),
            AnimationSelector::Title("aurora".into())
        );
        assert_eq!(
            AnimationSelector::from_query("?other=2"),
            AnimationSelector::First
        );
        assert_eq!(AnimationSelector::from_query(""), AnimationSelector::First);
        assert_eq!(
            AnimationSelector::from_query("animation="),
            AnimationSelector::First
        );
        assert_eq!(
            AnimationSelector::from_query("animation=star+tunnel"),
            AnimationSelector::Title("star tunnel".into())
        );
    }

    #[test]
    fn test_query_values_are_percent_decoded() {
        assert_eq!(
            AnimationSelector::from_query("?animation=star%20tunnel"),
            AnimationSelector::Title("star tunnel".into())
        );
        assert_eq!(
            AnimationSelector::from_query("?animation=%33"),
            AnimationSelector::Index(3)
        );
        let registry = AnimationRegistry::builtin();
        assert_eq!(
            AnimationSelector::from_query("?animation=Star%20Tunnel").resolve(&registry),
            registry.find_by_title("star tunnel").unwrap()
        );
        assert_ne!(registry.find_by_title("star tunnel"), Some(0));
    }

    #[test]
    fn test_from_str_accepts_both_forms() {
        assert_eq!(
            "?animation=2".parse::<AnimationSelector>().unwrap(),
            AnimationSelector::Index(2)
        );
        assert_eq!(
            "Sand".parse::<AnimationSelector>().unwrap(),
            AnimationSelector::Title("Sand".into())
        );
    }

    #[test]
    fn test_resolve() {
        let registry = AnimationRegistry::builtin();
        assert_eq!(AnimationSelector::from_query("?animation=3").resolve(&registry), 2);
        assert_eq!(AnimationSelector::from_query("?animation=1").resolve(&registry), 0);
        assert_eq!(
            AnimationSelector::from_query("?animation=aurora").resolve(&registry),
            registry.find_by_title("Aurora").unwrap()
        );
        assert_eq!(
            AnimationSelector::from_query("?animation=AuRoRa").resolve(&registry),
            2
        );
    }

    #[test]
    fn test_resolve_falls_back_to_first() {
        let registry = AnimationRegistry::builtin();
        for query in ["?animation=0", "?animation=999", "?animation=nothing-like-this", ""] {
            assert_eq!(AnimationSelector::from_query(query).resolve(&registry), 0, "{query}");
        }
    }
}
