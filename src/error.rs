use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the criteria layer.
///
/// With the default [`CombinatorPolicy::Drop`](crate::criteria::CombinatorPolicy)
/// normalization itself never fails; the malformed variants only surface
/// under the strict policy.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("combinator `{key}` expects an array of clauses, found {found}")]
    MalformedCombinator { key: String, found: &'static str },

    #[error("clause inside `{combinator}` must be an object, found {found}")]
    MalformedClause {
        combinator: String,
        found: &'static str,
    },

    #[error("invalid schema: {0}")]
    InvalidSchema(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unknown combinator policy {0:?} (expected \"drop\" or \"strict\")")]
    UnknownPolicy(String),
}
