//! Routing decisions for clicked links.
//!
//! [`classify_link`] applies the checks in a fixed order: anchor, special
//! protocol, internal navigation, external. The first match wins, so
//! `#mailto:x` is an anchor and `mailto:#x` is a special protocol.

use url::Url;

use crate::config::EdsConfig;

/// Schemes handed to the operating system instead of the browser or the app.
pub const SPECIAL_PROTOCOLS: &[&str] = &["mailto:", "tel:", "sms:"];

/// A page inside the site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Page(String),
}

impl Route {
    /// Route for a normalised site path; the empty path is home.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.is_empty() {
            Route::Home
        } else {
            Route::Page(path)
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Home => "",
            Route::Page(path) => path,
        }
    }
}

/// What a consumer should do with a clicked URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Same-page fragment (without the `#`). Classified but not acted on yet.
    Anchor(String),
    /// Hand the URL to the platform (browser, mail client, dialer).
    External(String),
    /// Navigate within the app.
    Navigate(Route),
}

/// Classify `url`, ignoring surrounding whitespace.
pub fn classify_link(url: &str, config: &EdsConfig) -> LinkAction {
    let url = url.trim();
    let action = if is_anchor_link(url) {
        LinkAction::Anchor(url[1..].to_string())
    } else if is_special_protocol(url) {
        LinkAction::External(url.to_string())
    } else if should_navigate_internally(url, config) {
        LinkAction::Navigate(Route::from_path(extract_path(url, config)))
    } else {
        LinkAction::External(url.to_string())
    };
    log::trace!("classified link '{url}' as {action:?}");
    action
}

pub fn is_anchor_link(url: &str) -> bool {
    url.starts_with('#')
}

pub fn is_special_protocol(url: &str) -> bool {
    let url = url.trim_start();
    SPECIAL_PROTOCOLS.iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// True for relative URLs and for absolute URLs on the configured site origin.
pub fn should_navigate_internally(url: &str, config: &EdsConfig) -> bool {
    absolutize(url, config).is_some_and(|parsed| config.is_site_origin(&parsed))
}

/// Site path of an internal URL: origin, leading and trailing slashes, query
/// and fragment removed. `""` denotes the site root, as does `index`.
pub fn extract_path(url: &str, config: &EdsConfig) -> String {
    match absolutize(url, config) {
        Some(parsed) => normalize_site_path(parsed.path()),
        None => {
            let without_suffix = url.split(['?', '#']).next().unwrap_or_default();
            let origin = config.site_origin();
            normalize_site_path(
                without_suffix
                    .strip_prefix(origin.as_str())
                    .unwrap_or(without_suffix),
            )
        }
    }
}

pub(crate) fn normalize_site_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed == "index" {
        String::new()
    } else {
        trimmed.to_string()
    }
}

fn absolutize(url: &str, config: &EdsConfig) -> Option<Url> {
    let url = url.trim();
    match Url::parse(url) {
        Ok(parsed) => Some(parsed),
        Err(url::ParseError::RelativeUrlWithoutBase) => config.site_url().join(url).ok(),
        Err(err) => {
            log::debug!("unparseable link '{url}': {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn config() -> EdsConfig {
        EdsConfig::new("https://example.com", "https://json.example.net/org/site").unwrap()
    }

    #[rstest]
    #[case("#top", true)]
    #[case("#", true)]
    #[case("#mailto:a@b.com", true)]
    #[case("/page#top", false)]
    #[case("", false)]
    fn anchor_links(#[case] url: &str, #[case] expected: bool) {
        assert_eq!(is_anchor_link(url), expected);
    }

    #[rstest]
    #[case("mailto:a@b.com", true)]
    #[case("tel:+15551234", true)]
    #[case("sms:+15551234", true)]
    #[case("MAILTO:A@B.COM", true)]
    #[case("mailto:#x", true)]
    #[case("https://example.com/mailto:", false)]
    #[case("/contact", false)]
    #[case("tel", false)]
    fn special_protocols(#[case] url: &str, #[case] expected: bool) {
        assert_eq!(is_special_protocol(url), expected);
    }

    #[rstest]
    #[case("/path", true)]
    #[case("about", true)]
    #[case("https://example.com/p", true)]
    #[case("https://EXAMPLE.com/p", true)]
    #[case("https://other.com/p", false)]
    #[case("http://example.com/p", false)]
    #[case("https://example.com:8443/p", false)]
    #[case("//other.com/p", false)]
    #[case("//example.com/p", true)]
    #[case("mailto:a@b.com", false)]
    fn internal_navigation(#[case] url: &str, #[case] expected: bool) {
        assert_eq!(should_navigate_internally(url, &config()), expected);
    }

    #[rstest]
    #[case("/index", "")]
    #[case("/", "")]
    #[case("", "")]
    #[case("index", "")]
    #[case("https://example.com", "")]
    #[case("https://example.com/index", "")]
    #[case("https://example.com/about", "about")]
    #[case("/blog/post-1/", "blog/post-1")]
    #[case("/docs?x=1#install", "docs")]
    fn extracted_paths(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(extract_path(url, &config()), expected);
    }

    #[rstest]
    #[case("#top", LinkAction::Anchor("top".to_string()))]
    #[case("#mailto:x", LinkAction::Anchor("mailto:x".to_string()))]
    #[case("mailto:#x", LinkAction::External("mailto:#x".to_string()))]
    #[case("tel:123", LinkAction::External("tel:123".to_string()))]
    #[case(" #top", LinkAction::Anchor("top".to_string()))]
    #[case("  mailto:a@b.c ", LinkAction::External("mailto:a@b.c".to_string()))]
    #[case(" /about ", LinkAction::Navigate(Route::Page("about".to_string())))]
    #[case("/", LinkAction::Navigate(Route::Home))]
    #[case("/index", LinkAction::Navigate(Route::Home))]
    #[case("/about", LinkAction::Navigate(Route::Page("about".to_string())))]
    #[case(
        "https://example.com/blog/a",
        LinkAction::Navigate(Route::Page("blog/a".to_string()))
    )]
    #[case(
        "https://other.com/p",
        LinkAction::External("https://other.com/p".to_string())
    )]
    fn classification_precedence(#[case] url: &str, #[case] expected: LinkAction) {
        assert_eq!(classify_link(url, &config()), expected);
    }

    #[test]
    fn route_paths() {
        assert_eq!(Route::from_path(""), Route::Home);
        assert_eq!(Route::Home.path(), "");
        assert_eq!(Route::from_path("about").path(), "about");
    }
}
