use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors reported while loading tabulated data, building a spline or evaluating a function.
#[derive(Debug, Error)]
pub enum Error {
    /// The path does not exist or is not a regular file.
    #[error("file {path:?} does not exist or is not a regular file")]
    MissingFile { path: PathBuf },

    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Fewer than two complete (x, y) pairs were available.
    #[error("at least 2 samples are required, got {count}")]
    InsufficientSamples { count: usize },

    /// Knot `index` does not lie strictly to the right of knot `index - 1`.
    #[error("knot x values must be strictly increasing, violated at index {index}")]
    UnorderedKnots { index: usize },

    /// The input ended with an x value that has no paired y value.
    #[error("input ends with an unpaired value {value}")]
    DanglingValue { value: f64 },

    #[error("x = {x} is out of range [{min}, {max}]")]
    OutOfRange { x: f64, min: f64, max: f64 },

    /// Evaluation was requested before any initialization.
    #[error("interpolated function is not initialized")]
    Uninitialized,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_message_names_path() {
        let error = Error::MissingFile { path: PathBuf::from("/no/such/spectrum.dat") };
        assert!(error.to_string().contains("/no/such/spectrum.dat"));
    }

    #[test]
    fn read_error_keeps_source() {
        use std::error::Error as _;

        let error = Error::Read {
            path: PathBuf::from("flux.dat"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(error.source().is_some());
    }
}
