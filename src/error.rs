use thiserror::Error;

/// Errors surfaced by the choropleth pipeline.
///
/// Per-row numeric parse failures are not an error kind: they are recovered
/// locally by dropping the row (see [`crate::Dataset::dropped`]).
#[derive(Debug, Error)]
pub enum Error {
    /// A resource could not be fetched or parsed. The load is aborted and no
    /// partial state is committed.
    #[error("load error: {0}")]
    Load(String),

    /// An unsupported selector (granularity, transform, palette) or a
    /// topology missing the requested collection.
    #[error("config error: {0}")]
    Config(String),

    /// A newer render request was issued while this one was in flight; the
    /// stale result is discarded rather than applied.
    #[error("render superseded by a newer request")]
    Superseded,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn load(msg: impl std::fmt::Display) -> Self {
        Self::Load(msg.to_string())
    }

    pub(crate) fn config(msg: impl std::fmt::Display) -> Self {
        Self::Config(msg.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
