//! Typed errors raised by the detection pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("capture device produced no frame {failures} times in a row")]
    CaptureLost { failures: u32 },

    #[error("buffer of {len} bytes does not hold a {width}x{height} image")]
    BufferSize { width: u32, height: u32, len: usize },

    #[error("invalid threshold bounds: {0}")]
    InvalidBounds(String),

    #[error("config file {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
