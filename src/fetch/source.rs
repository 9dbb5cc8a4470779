use std::path::PathBuf;

use anyhow::Context as _;
use async_trait::async_trait;
use futures::future::join_all;

use crate::foundation::error::{KakijunError, KakijunResult};
use crate::resolve::codepoint::LookupKey;

/// Result of retrieving one diagram. Failures of any kind collapse into `NotFound`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Raw SVG markup.
    Found(String),
    /// No diagram for this key.
    NotFound,
}

impl FetchOutcome {
    fn from_result(key: &LookupKey, res: KakijunResult<String>) -> Self {
        match res {
            Ok(markup) => Self::Found(markup),
            Err(err) => {
                tracing::debug!(%key, error = %err, "diagram not found");
                Self::NotFound
            }
        }
    }
}

/// Where diagram markup comes from.
#[async_trait]
pub trait DiagramSource: Send + Sync {
    /// Retrieve the diagram for `key`. Never fails; errors are reported as `NotFound`.
    async fn fetch(&self, key: &LookupKey) -> FetchOutcome;
}

#[async_trait]
impl<S: DiagramSource + ?Sized> DiagramSource for std::sync::Arc<S> {
    async fn fetch(&self, key: &LookupKey) -> FetchOutcome {
        (**self).fetch(key).await
    }
}

/// Fetch every key concurrently and wait for all of them to settle.
///
/// Outcomes are returned in key order.
#[tracing::instrument(skip(source, keys), fields(n = keys.len()))]
pub async fn fetch_all<S: DiagramSource + ?Sized>(
    source: &S,
    keys: &[LookupKey],
) -> Vec<FetchOutcome> {
    join_all(keys.iter().map(|k| source.fetch(k))).await
}

/// Read-only HTTP repository serving `{base_url}{key}.svg`.
#[derive(Clone, Debug)]
pub struct HttpDiagramSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDiagramSource {
    /// Source rooted at `base_url`; a trailing `/` is added when missing.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Source using a caller-provided client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { client, base_url }
    }

    /// Full URL for `key`.
    pub fn url_for(&self, key: &LookupKey) -> String {
        format!("{}{}", self.base_url, key.file_name())
    }

    async fn get_markup(&self, key: &LookupKey) -> KakijunResult<String> {
        let url = self.url_for(key);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| KakijunError::fetch(format!("GET {url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(KakijunError::fetch(format!("GET {url}: status {status}")));
        }
        resp.text()
            .await
            .map_err(|e| KakijunError::fetch(format!("read body of {url}: {e}")))
    }
}

#[async_trait]
impl DiagramSource for HttpDiagramSource {
    async fn fetch(&self, key: &LookupKey) -> FetchOutcome {
        FetchOutcome::from_result(key, self.get_markup(key).await)
    }
}

/// Local mirror of the repository: `{dir}/{key}.svg`.
#[derive(Clone, Debug)]
pub struct DirDiagramSource {
    dir: PathBuf,
}

impl DirDiagramSource {
    /// Source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read_markup(&self, key: &LookupKey) -> KakijunResult<String> {
        let path = self.dir.join(key.file_name());
        let markup = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("read diagram '{}'", path.display()))?;
        Ok(markup)
    }
}

#[async_trait]
impl DiagramSource for DirDiagramSource {
    async fn fetch(&self, key: &LookupKey) -> FetchOutcome {
        FetchOutcome::from_result(key, self.read_markup(key).await)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fetch/source.rs"]
mod tests;
