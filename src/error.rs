use thiserror::Error;

/// Everything that can go wrong while talking to the Web API.
///
/// Every operation is fail-fast: the first error aborts the enclosing call and
/// is handed back unchanged. Nothing in the crate retries.
#[derive(Error, Debug)]
pub enum Error {
    /// Connection, timeout or protocol failure before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    ///
    /// A stale `snapshot_id` on the delete request surfaces here as well.
    #[error("request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A response body did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid configuration file: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
