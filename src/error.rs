use std::io;
use std::path::PathBuf;
use thiserror::Error;

//===========================================================================//

/// Result type for ICO conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while turning a PNG into an ICO file.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be opened or read.
    #[error("could not open input file {path:?}: {source}")]
    InputAccess {
        /// Path of the input file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The input bytes are not a decodable PNG image.
    #[error("could not decode input PNG file: {0}")]
    Decode(String),

    /// The output file could not be created.
    #[error("could not open output file {path:?}: {source}")]
    OutputAccess {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The pixel data could not be re-encoded as the embedded PNG resource.
    #[error("could not encode icon resource: {0}")]
    Encode(String),

    /// Writing to the output sink failed or was cut short.
    #[error("could not write ICO data: {0}")]
    Io(#[from] io::Error),

    /// An ICO file being read back does not have the single-image layout.
    #[error("malformed ICO file: {0}")]
    Malformed(String),
}

//===========================================================================//


//===========================================================================//
