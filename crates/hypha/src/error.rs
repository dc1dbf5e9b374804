use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown layout type `{0}` (expected `static` or `dynamic`)")]
    UnknownLayoutType(String),

    #[error("unknown texture mode `{0}` (expected `align` or `rotate`)")]
    UnknownTextureMode(String),

    #[error("unparsable color spec `{0}`")]
    InvalidColor(String),

    #[error("attribute `{attr}` must be numeric, got `{value}`")]
    NonNumeric { attr: String, value: String },

    #[error("node {0} has no remote binding")]
    UnknownNode(String),

    #[error("cannot resolve path `{path}`")]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    /// Wrap a transport-level failure. The source is preserved unmodified;
    /// callers decide what to do with a half-applied batch.
    pub fn transport(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(source))
    }

    pub(crate) fn unknown_node(key: &dyn fmt::Debug) -> Self {
        Self::UnknownNode(format!("{key:?}"))
    }
}
