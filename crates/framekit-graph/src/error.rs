/// Errors returned by frame-graph operations.
///
/// Every variant carries the path or name that caused it. Nothing is retried
/// internally; a failed mutation leaves the graph unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Malformed textual path: empty, bad characters, or not absolute where
    /// an absolute path is required.
    #[error("invalid path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },
    /// Resolution landed on no frame, or a handle into a deleted subtree was
    /// used.
    #[error("unknown frame `{path}`")]
    UnknownFrame { path: String },
    /// A sibling with the same name already exists.
    #[error("frame `{name}` already exists under `{parent}`")]
    DuplicateFrame { parent: String, name: String },
    /// The root frame cannot be deleted or reposed.
    #[error("the root frame cannot be deleted or reposed")]
    RootWrite,
}

impl FrameError {
    pub(crate) fn invalid(path: &str, reason: impl Into<String>) -> Self {
        FrameError::InvalidPath {
            path: path.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown(path: impl Into<String>) -> Self {
        FrameError::UnknownFrame { path: path.into() }
    }
}
