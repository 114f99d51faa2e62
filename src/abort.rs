//! Hard failing loaders for setup time configuration, where continuing without the data is
//! meaningless. These are the only functions in the crate that terminate the process.

use std::{path::Path, process};

use log::error;

use crate::{error::Error, function::InterpolatedFunction};

/// Exit status used when a required data file cannot be loaded.
pub const EXIT_CODE: i32 = 1;

/// Loads `path` into `function`, or prints a diagnostic naming `path` to stderr and exits with
/// [`EXIT_CODE`].
pub fn load_file_or_exit<P: AsRef<Path>>(function: &mut InterpolatedFunction, path: P) {
    let path = path.as_ref();
    if let Err(error) = function.load_file(path) {
        exit_with_diagnostic(path, &error);
    }
}

pub fn from_file_or_exit<P: AsRef<Path>>(path: P) -> InterpolatedFunction {
    let path = path.as_ref();
    InterpolatedFunction::from_file(path)
        .unwrap_or_else(|error| exit_with_diagnostic(path, &error))
}

/// Message printed before exiting.
pub fn diagnostic(path: &Path, error: &Error) -> String {
    format!(
        "Can not initialize interpolated function using file {} ! ({})",
        path.display(),
        error
    )
}

fn exit_with_diagnostic(path: &Path, error: &Error) -> ! {
    let message = diagnostic(path, error);
    error!("{}", message);
    eprintln!("{}", message);
    process::exit(EXIT_CODE)
}
