//! Getting serialized trees in and out: JSON codec, files, and the remote tree source.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::SourceError;
use crate::node::Node;

/// Default address of the service that dumps simulation trees.
pub const DEFAULT_BASE_URL: &str = "http://db.nbg1.emile.space";

pub fn decode_tree(bytes: &[u8]) -> Result<Node, SourceError> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn encode_tree(tree: &Node) -> Result<String, SourceError> {
    serde_json::to_string(tree).map_err(SourceError::Encode)
}

/// Path of the batch input/output file for tree `index`, e.g. `dir/3.json`.
pub fn tree_path(dir: &Path, index: usize, extension: &str) -> PathBuf {
    dir.join(format!("{index}.{extension}"))
}

pub fn read_tree_file(path: &Path) -> Result<Node, SourceError> {
    let bytes = std::fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let tree = decode_tree(&bytes)?;
    debug!(path = %path.display(), stars = tree.star_count(), "read tree file");
    Ok(tree)
}

pub fn write_tree_file(path: &Path, tree: &Node) -> Result<(), SourceError> {
    let json = encode_tree(tree)?;
    std::fs::write(path, json).map_err(|source| SourceError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Trait for anything that can hand out the tree for a given index.
pub trait TreeSource: Send + Sync + 'static {
    fn fetch(&self, index: usize) -> impl Future<Output = Result<Node, SourceError>> + Send;
}

/// Fetches trees from `{base_url}/dumptree/{index}`.
#[derive(Clone, Debug)]
pub struct HttpTreeSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTreeSource {
    /// Every fetch gives up after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| SourceError::Fetch {
                index: 0,
                url: base_url.clone(),
                source,
            })?;
        Ok(Self { client, base_url })
    }

    pub fn tree_url(&self, index: usize) -> String {
        format!("{}/dumptree/{index}", self.base_url)
    }

    fn fetch_error(index: usize, url: &str, source: reqwest::Error) -> SourceError {
        if source.is_timeout() {
            SourceError::Timeout {
                index,
                url: url.to_string(),
            }
        } else {
            SourceError::Fetch {
                index,
                url: url.to_string(),
                source,
            }
        }
    }
}

impl TreeSource for HttpTreeSource {
    async fn fetch(&self, index: usize) -> Result<Node, SourceError> {
        let url = self.tree_url(index);
        info!(index, %url, "getting the galaxy");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Self::fetch_error(index, &url, e))?;
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::fetch_error(index, &url, e))?;
        let tree = decode_tree(&body)?;
        info!(index, bytes = body.len(), stars = tree.star_count(), "done getting the galaxy");
        Ok(tree)
    }
}
