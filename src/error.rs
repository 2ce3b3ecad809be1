use std::path::PathBuf;

/// Errors raised while turning raw bytes into a loaded document
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("renderer rejected the document: {0}")]
    Rejected(String),

    #[error("document has no pages")]
    NoPages,
}

/// Errors raised while rasterizing a single page
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("page {page} is out of range (document has {page_count} pages)")]
    PageOutOfRange { page: usize, page_count: usize },

    #[error("no document loaded")]
    NoDocument,

    #[error("renderer: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("failed to copy to clipboard: {0}")]
    CopyFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
