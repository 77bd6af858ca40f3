//! Conversion error types.
//!
//! Only fatal conditions live here. Malformed records and unknown labels are absorbed
//! by the lexing and normalization stages and never surface as errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::formats::FormatError;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("cannot read {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read failure at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("structure error: {0}")]
    Structure(String),

    #[error(transparent)]
    Format(#[from] FormatError),
}
