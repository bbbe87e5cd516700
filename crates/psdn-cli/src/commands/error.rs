use std::io;

/// Failures while reading inputs or writing outputs.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("invalid parser unit JSON in '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("no parser units in '{0}'")]
    NoUnits(String),

    #[error("failed to write '{path}': {source}")]
    Write { path: String, source: io::Error },
}
