use std::path::PathBuf;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failures in the loading and output layers.
///
/// Note that an unsolvable puzzle is *not* an error: the solver reports it as
/// an ordinary `None` outcome. Only malformed inputs and I/O problems reach
/// this type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed structure: {0}")]
    MalformedStructure(String),

    #[error("could not encode solution: {0}")]
    Json(#[from] serde_json::Error),
}
