//! Reading of two column numeric data.
//!
//! The format is a plain stream of whitespace separated numbers. Values are taken pairwise:
//! the first of each pair is an argument, the second its function value. There is no header
//! and no comment syntax. Reading stops at the first token that is not a number, and a final
//! value without a partner is set aside as [`SampleSet::dangling`].

use std::{fs, path::Path};

use log::{debug, warn};

use crate::{
    error::{Error, Result},
    knot::Knot,
    options::{DanglingValuePolicy, LoadOptions, OrderingPolicy},
};

/// Samples read from a two column source, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    /// Trailing argument that had no paired value.
    pub dangling: Option<f64>,
    /// Line number (1 based) of a non numeric token that ended reading early.
    pub stopped_at_line: Option<usize>,
}

impl SampleSet {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Turns the samples into spline knots, applying the dangling value and ordering policies.
    pub fn into_knots(self, options: &LoadOptions) -> Result<Vec<Knot>> {
        if let Some(value) = self.dangling {
            match options.dangling {
                DanglingValuePolicy::Drop => warn!(
                    "dropping unpaired trailing value {} after {} samples",
                    value,
                    self.xs.len()
                ),
                DanglingValuePolicy::Reject => return Err(Error::DanglingValue { value }),
            }
        }

        let mut knots = Knot::from_columns(&self.xs, &self.ys);
        if options.ordering == OrderingPolicy::Sort {
            knots.sort();
        }
        Ok(knots)
    }
}

/// Reads two column data from the file at `path`.
///
/// # Errors
/// [`Error::MissingFile`] when `path` is not an existing regular file, [`Error::Read`] when it
/// cannot be read.
pub fn read_two_column<P: AsRef<Path>>(path: P) -> Result<SampleSet> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::MissingFile { path: path.to_path_buf() });
    }

    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    // invalid UTF-8 becomes U+FFFD, which then stops parsing like any other non numeric token
    let samples = parse_two_column(&String::from_utf8_lossy(&bytes));
    debug!("read {} samples from {:?}", samples.len(), path);
    Ok(samples)
}

/// Parses two column data from text.
///
/// # Example
/// ```
/// use tabulated_spline::parse_two_column;
///
/// let samples = parse_two_column("0 0\n1 1\n2 4\n3");
///
/// assert_eq!(vec![0.0, 1.0, 2.0], samples.xs);
/// assert_eq!(vec![0.0, 1.0, 4.0], samples.ys);
/// assert_eq!(Some(3.0), samples.dangling);
/// ```
pub fn parse_two_column(text: &str) -> SampleSet {
    let mut samples = SampleSet::default();
    let mut pending_x: Option<f64> = None;

    'lines: for (line_index, line) in text.lines().enumerate() {
        for token in line.split_whitespace() {
            let value = match token.parse::<f64>() {
                Ok(value) => value,
                Err(_) => {
                    warn!(
                        "stopped reading at non numeric token {:?} on line {}",
                        token,
                        line_index + 1
                    );
                    samples.stopped_at_line = Some(line_index + 1);
                    break 'lines;
                }
            };

            match pending_x.take() {
                None => pending_x = Some(value),
                Some(x) => {
                    samples.xs.push(x);
                    samples.ys.push(value);
                }
            }
        }
    }

    samples.dangling = pending_x;
    samples
}
