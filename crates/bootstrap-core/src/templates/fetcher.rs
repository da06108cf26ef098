//! Template fetching from the remote template repository or a local directory
//!
//! Both sources address files by the same relative resource path
//! (e.g. `licenses/MIT.txt`), so a local checkout of the template repository
//! behaves exactly like the remote one.

use crate::error::{Error, Result};
use crate::product::ProductConfig;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

/// Capability to retrieve a template resource as raw bytes
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>>;
}

/// Template source - either remote URL or local directory
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Remote(Url),
    Local(PathBuf),
}

impl TemplateSource {
    /// Create a remote template source from a product config.
    ///
    /// The product's environment variable wins over `configured`, which wins
    /// over the product default.
    pub fn from_config<C: ProductConfig>(config: &C, configured: Option<&str>) -> Result<Self> {
        let url_str = std::env::var(config.template_url_env())
            .ok()
            .or_else(|| configured.map(str::to_owned))
            .unwrap_or_else(|| config.default_template_url().to_string());
        Self::remote(&url_str)
    }

    pub fn remote(url_str: &str) -> Result<Self> {
        let url = Url::parse(url_str).map_err(|e| Error::Fetch {
            url: url_str.to_string(),
            reason: format!("invalid template URL: {}", e),
        })?;
        Ok(Self::Remote(url))
    }

    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

/// Template fetcher - handles retrieving templates from remote or local sources
pub struct TemplateFetcher {
    source: TemplateSource,
    client: reqwest::Client,
}

impl TemplateFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(source: TemplateSource, user_agent: &str) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a fetcher from a product config
    pub fn from_config<C: ProductConfig>(config: &C, configured: Option<&str>) -> Result<Self> {
        let source = TemplateSource::from_config(config, configured)?;
        Ok(Self::new(source, config.user_agent()))
    }

    /// Create a fetcher for local templates
    pub fn from_local(path: PathBuf, user_agent: &str) -> Self {
        Self::new(TemplateSource::local(path), user_agent)
    }

    /// Build a URL by appending a relative resource path, preserving query parameters
    fn build_url(base: &Url, resource: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Fetch {
                url: base.to_string(),
                reason: "URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .extend(resource.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    /// Where `resource` will be read from, for messages
    pub fn location(&self, resource: &str) -> String {
        match &self.source {
            TemplateSource::Remote(base) => Self::build_url(base, resource)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| format!("{}/{}", base, resource)),
            TemplateSource::Local(path) => path.join(resource).display().to_string(),
        }
    }

    /// Get the template source
    pub fn source(&self) -> &TemplateSource {
        &self.source
    }
}

impl Fetch for TemplateFetcher {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>> {
        match &self.source {
            TemplateSource::Remote(base_url) => {
                let url = Self::build_url(base_url, resource)?;
                debug!(%url, "fetching template resource");

                // reqwest follows redirects by default
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(|e| Error::Fetch {
                        url: url.to_string(),
                        reason: e.to_string(),
                    })?;

                if !response.status().is_success() {
                    return Err(Error::Fetch {
                        url: url.to_string(),
                        reason: format!("HTTP {}", response.status()),
                    });
                }

                let bytes = response.bytes().await.map_err(|e| Error::Fetch {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;
                Ok(bytes.to_vec())
            }
            TemplateSource::Local(path) => {
                let file = path.join(resource);
                debug!(path = %file.display(), "reading local template resource");
                fs::read(&file).await.map_err(|e| Error::Fetch {
                    url: file.display().to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

/// How fetched content lands in the destination file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Overwrite,
    Append,
}

/// Fetch `resource` and write (or append) it to `destination`
pub async fn fetch_to_file<F: Fetch>(
    fetcher: &F,
    resource: &str,
    destination: &Path,
    mode: WriteMode,
) -> Result<()> {
    let content = fetcher.fetch(resource).await?;

    let mut options = fs::OpenOptions::new();
    options.create(true);
    match mode {
        WriteMode::Overwrite => options.write(true).truncate(true),
        WriteMode::Append => options.append(true),
    };

    let mut file = options
        .open(destination)
        .await
        .map_err(|e| Error::io(destination, e))?;
    file.write_all(&content)
        .await
        .map_err(|e| Error::io(destination, e))?;
    file.flush().await.map_err(|e| Error::io(destination, e))?;

    info!(
        resource,
        destination = %destination.display(),
        bytes = content.len(),
        ?mode,
        "wrote template file"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    /// Answer a single HTTP request on a loopback port with `status` and `body`
    async fn serve_once(status: &'static str, body: &'static str) -> TemplateSource {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        });
        TemplateSource::remote(&format!("http://{}/src", addr)).unwrap()
    }

    fn base() -> Url {
        Url::parse("https://raw.githubusercontent.com/owner/templates/main/src").unwrap()
    }

    #[test]
    fn test_build_url_appends_nested_resource() {
        let url = TemplateFetcher::build_url(&base(), "licenses/MIT.txt").unwrap();
        assert_eq!(
            url.as_str(),
            "https://raw.githubusercontent.com/owner/templates/main/src/licenses/MIT.txt"
        );
    }

    #[test]
    fn test_build_url_with_trailing_slash() {
        let base = Url::parse("https://example.com/templates/").unwrap();
        let url = TemplateFetcher::build_url(&base, ".gitignore").unwrap();
        assert_eq!(url.as_str(), "https://example.com/templates/.gitignore");
    }

    #[test]
    fn test_build_url_keeps_query() {
        let base = Url::parse("https://example.com/src?ref=dev").unwrap();
        let url = TemplateFetcher::build_url(&base, "pyproject_stub.toml").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/src/pyproject_stub.toml?ref=dev"
        );
    }

    #[test]
    fn test_invalid_remote_url() {
        let err = TemplateSource::remote("not a url").unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_local_fetch_overwrite_and_append() {
        let templates = TempDir::new().unwrap();
        std::fs::write(templates.path().join("stub.toml"), "[tool.ruff]\n").unwrap();
        let fetcher = TemplateFetcher::from_local(templates.path().to_path_buf(), "test");

        let out = TempDir::new().unwrap();
        let dest = out.path().join("pyproject.toml");
        std::fs::write(&dest, "[project]\n").unwrap();

        fetch_to_file(&fetcher, "stub.toml", &dest, WriteMode::Append)
            .await
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(&dest).unwrap(),
            "[project]\n[tool.ruff]\n"
        );

        fetch_to_file(&fetcher, "stub.toml", &dest, WriteMode::Overwrite)
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "[tool.ruff]\n");
    }

    #[tokio::test]
    async fn test_missing_local_resource_is_fetch_error() {
        let templates = TempDir::new().unwrap();
        let fetcher = TemplateFetcher::from_local(templates.path().to_path_buf(), "test");
        let dest = templates.path().join("out.txt");

        let err = fetch_to_file(&fetcher, "licenses/MIT.txt", &dest, WriteMode::Overwrite)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_remote_not_found_is_fetch_error() {
        let source = serve_once("404 Not Found", "404: Not Found").await;
        let fetcher = TemplateFetcher::new(source, "test");
        let out = TempDir::new().unwrap();
        let dest = out.path().join(".gitignore");

        let err = fetch_to_file(&fetcher, ".gitignore", &dest, WriteMode::Overwrite)
            .await
            .unwrap_err();
        match err {
            Error::Fetch { url, reason } => {
                assert!(url.ends_with("/src/.gitignore"));
                assert!(reason.contains("404"));
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_remote_fetch_writes_body() {
        let source = serve_once("200 OK", "__pycache__/\n").await;
        let fetcher = TemplateFetcher::new(source, "test");
        let out = TempDir::new().unwrap();
        let dest = out.path().join(".gitignore");

        fetch_to_file(&fetcher, ".gitignore", &dest, WriteMode::Overwrite)
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "__pycache__/\n");
    }
}
