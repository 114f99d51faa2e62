//! Tabulated one dimensional real function, loaded from a two column text file and evaluated
//! with natural cubic spline interpolation. Outside the tabulated domain the function is flat,
//! equal to the nearest boundary sample. A constant function `f(x) = 1` over a declared domain
//! is available for callers that want to switch the data off.
//!
//! # Example
//! ```
//! use tabulated_spline::InterpolatedFunction;
//! use assert_approx_eq::assert_approx_eq;
//!
//! let path = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/parabola.dat");
//! let mut function = InterpolatedFunction::from_file(path).unwrap();
//!
//! assert_approx_eq!(2.2, function.cached_evaluate(1.5), 1e-12);
//! assert_eq!(0.0, function.evaluate(-5.0));
//! assert_eq!(9.0, function.evaluate(100.0));
//! ```
//!
//! Files are read with [`read_two_column`]; see the [`reader`] module for the format. Loading
//! behaviour for unordered arguments and unpaired trailing values is set with [`LoadOptions`].
//! Processes that cannot run without their data use the [`abort`] helpers.

pub mod abort;
mod error;
mod function;
mod knot;
mod options;
mod polynomial;
pub mod reader;
mod spline;

pub use error::{Error, Result};
pub use function::{Domain, InterpolatedFunction};
pub use knot::Knot;
pub use options::{DanglingValuePolicy, LoadOptions, OrderingPolicy};
pub use reader::{parse_two_column, read_two_column, SampleSet};
pub use spline::Spline;
