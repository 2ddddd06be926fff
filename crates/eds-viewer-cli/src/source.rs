use anyhow::{Context, Result, bail};
use eds_viewer_engine::{EdsConfig, EdsPage, Route};
use std::path::{Path, PathBuf};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where page JSON comes from.
pub enum PageSource {
    /// The site's HTML-to-JSON service.
    Remote(reqwest::blocking::Client),
    /// A saved page (home only) or a directory of `<path>.json` files.
    Local(PathBuf),
}

impl PageSource {
    pub fn remote() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("eds-viewer/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self::Remote(client))
    }

    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::Local(path.into())
    }

    pub fn load(&self, route: &Route, config: &EdsConfig) -> Result<EdsPage> {
        let body = match self {
            Self::Remote(client) => fetch(client, &config.page_json_url(route.path()))?,
            Self::Local(path) => read_local(path, route)?,
        };
        EdsPage::from_json_str(&body).context("failed to decode page")
    }
}

fn fetch(client: &reqwest::blocking::Client, url: &str) -> Result<String> {
    log::info!("fetching {url}");
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("request to {url} failed"))?
        .error_for_status()
        .with_context(|| format!("{url} returned an error status"))?;
    response
        .text()
        .with_context(|| format!("failed to read response body from {url}"))
}

fn read_local(path: &Path, route: &Route) -> Result<String> {
    let file = if path.is_dir() {
        let name = match route {
            Route::Home => "index",
            Route::Page(page) => page.as_str(),
        };
        path.join(format!("{name}.json"))
    } else if *route == Route::Home {
        path.to_path_buf()
    } else {
        bail!(
            "'{}' is a single page; cannot open '{}'",
            path.display(),
            route.path()
        );
    };

    log::info!("reading {}", file.display());
    std::fs::read_to_string(&file).with_context(|| format!("failed to read {}", file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PAGE: &str = r#"{"metadata": {"title": {"text": "Saved"}}, "content": []}"#;

    #[test]
    fn local_file_serves_home_only() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("page.json");
        std::fs::write(&file, PAGE).unwrap();
        let source = PageSource::local(&file);
        let config = EdsConfig::boilerplate().unwrap();

        let page = source.load(&Route::Home, &config).unwrap();
        assert_eq!(page.title(), Some("Saved"));

        let err = source
            .load(&Route::Page("about".to_string()), &config)
            .unwrap_err();
        assert!(err.to_string().contains("single page"));
    }

    #[test]
    fn local_directory_maps_routes_to_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.json"), PAGE).unwrap();
        std::fs::create_dir(dir.path().join("blog")).unwrap();
        std::fs::write(
            dir.path().join("blog").join("post.json"),
            r#"{"metadata": {"title": {"text": "Post"}}}"#,
        )
        .unwrap();
        let source = PageSource::local(dir.path());
        let config = EdsConfig::boilerplate().unwrap();

        assert_eq!(
            source.load(&Route::Home, &config).unwrap().title(),
            Some("Saved")
        );
        assert_eq!(
            source
                .load(&Route::Page("blog/post".to_string()), &config)
                .unwrap()
                .title(),
            Some("Post")
        );
        assert!(
            source
                .load(&Route::Page("missing".to_string()), &config)
                .is_err()
        );
    }

    #[test]
    fn undecodable_page_is_an_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("broken.json");
        std::fs::write(&file, "<!doctype html>").unwrap();

        let err = PageSource::local(&file)
            .load(&Route::Home, &EdsConfig::boilerplate().unwrap())
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to decode page"));
    }
}
