use url::Url;

use crate::links::normalize_site_path;

/// Site the AEM boilerplate publishes to.
pub const DEFAULT_SITE_URL: &str = "https://main--aem-boilerplate--adobe.aem.page";
/// HTML-to-JSON service endpoint for [`DEFAULT_SITE_URL`].
pub const DEFAULT_CONTENT_URL: &str =
    "https://mhast-html-to-json.adobeaem.workers.dev/adobe/aem-boilerplate";

#[derive(Debug, thiserror::Error)]
pub enum EdsConfigError {
    #[error("Invalid {field} '{value}': {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        source: url::ParseError,
    },
    #[error("{field} '{value}' must use http or https")]
    UnsupportedScheme { field: &'static str, value: String },
}

/// Site settings every renderer needs: where the site lives (for resolving
/// relative asset and link paths) and where its JSON is served from.
///
/// Passed explicitly down the render chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdsConfig {
    site_url: Url,
    content_url: Url,
}

impl EdsConfig {
    pub fn new(site_url: &str, content_url: &str) -> Result<Self, EdsConfigError> {
        Ok(Self {
            site_url: parse_http_url("site URL", site_url)?,
            content_url: parse_http_url("content URL", content_url)?,
        })
    }

    /// The AEM boilerplate site and its JSON service.
    pub fn boilerplate() -> Result<Self, EdsConfigError> {
        Self::new(DEFAULT_SITE_URL, DEFAULT_CONTENT_URL)
    }

    pub fn site_url(&self) -> &Url {
        &self.site_url
    }

    pub fn content_url(&self) -> &Url {
        &self.content_url
    }

    /// `scheme://host[:port]` of the site, without a trailing slash.
    pub fn site_origin(&self) -> String {
        self.site_url.origin().ascii_serialization()
    }

    pub fn is_site_origin(&self, url: &Url) -> bool {
        url.origin() == self.site_url.origin()
    }

    /// Resolve an image `src` or link `href` to an absolute URL.
    ///
    /// Absolute URLs (any scheme) come back unchanged, root-relative paths
    /// get the site origin, protocol-relative URLs get the site scheme and
    /// other relative paths are joined against the site URL. Absent or blank
    /// input stays absent.
    pub fn resolve_url(&self, url: Option<&str>) -> Option<String> {
        let raw = url?.trim();
        if raw.is_empty() {
            return None;
        }

        if Url::parse(raw).is_ok() {
            return Some(raw.to_string());
        }
        if raw.starts_with("//") {
            return Some(format!("{}:{raw}", self.site_url.scheme()));
        }
        if raw.starts_with('/') {
            return Some(format!("{}{raw}", self.site_origin()));
        }

        match self.site_url.join(raw) {
            Ok(joined) => Some(joined.to_string()),
            Err(err) => {
                log::debug!("could not join '{raw}' onto site URL: {err}");
                Some(format!("{}/{raw}", self.site_origin()))
            }
        }
    }

    /// JSON service URL for a site path. The root (`""`, `/`, `index`) maps
    /// to the service root.
    pub fn page_json_url(&self, path: &str) -> String {
        let base = self.content_url.as_str().trim_end_matches('/');
        let path = normalize_site_path(path);
        format!("{base}/{path}")
    }
}


fn parse_http_url(field: &'static str, value: &str) -> Result<Url, EdsConfigError> {
    let url = Url::parse(value.trim()).map_err(|source| EdsConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(EdsConfigError::UnsupportedScheme {
            field,
            value: value.to_string(),
        }),
    }
}
