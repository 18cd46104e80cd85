use std::path::PathBuf;
use thiserror::Error;

/// Failures that callers branch on. Everything else travels as `anyhow::Error`.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("cannot read posts directory {path:?}: {source}")]
    PostsDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("post not found: {slug} (scanned {scanned} documents)")]
    PostNotFound { slug: String, scanned: usize },
}
