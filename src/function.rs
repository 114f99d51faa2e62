use std::path::Path;

use log::debug;

use crate::{
    error::{Error, Result},
    options::LoadOptions,
    reader::read_two_column,
    spline::Spline,
};

/// Argument interval of an interpolated function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub x_min: f64,
    pub x_max: f64,
}

impl Domain {
    /// `x_min` moved down by a relative margin of `1e-5`. Evaluating there gives the boundary
    /// value.
    pub fn lower_bound(&self) -> f64 {
        if self.x_min > 0.0 {
            self.x_min * 0.99999
        } else {
            self.x_min * 1.00001
        }
    }

    /// `x_max` moved up by a relative margin of `1e-5`.
    pub fn upper_bound(&self) -> f64 {
        if self.x_max > 0.0 {
            self.x_max * 1.00001
        } else {
            self.x_max * 0.99999
        }
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Uninitialized,
    Unity { domain: Domain },
    Tabulated(Spline),
}

/// Real function of one real argument, either tabulated and cubic spline interpolated or
/// identically one over a declared domain.
///
/// A new instance is uninitialized. [`InterpolatedFunction::load_file`] and
/// [`InterpolatedFunction::init_unity`] may be called any number of times; each call fully
/// replaces the previous state.
///
/// Outside the tabulated domain the function is flat: it returns the value of the nearest
/// boundary sample.
///
/// # Panics
/// [`evaluate`](Self::evaluate), [`cached_evaluate`](Self::cached_evaluate),
/// [`batch_evaluate`](Self::batch_evaluate) and the domain bound getters panic on an
/// uninitialized instance. Use [`try_evaluate`](Self::try_evaluate) or
/// [`domain`](Self::domain) to check instead.
///
/// # Example
/// ```
/// use tabulated_spline::InterpolatedFunction;
///
/// let mut function = InterpolatedFunction::new();
/// assert!(function.load_file("/nonexistent/flux.dat").is_err());
/// assert!(!function.is_initialized());
///
/// function.init_unity(300.0, 900.0);
/// assert_eq!(1.0, function.evaluate(-1.0e6));
/// ```
#[derive(Debug, Default)]
pub struct InterpolatedFunction {
    state: State,
}

impl InterpolatedFunction {
    pub fn new() -> Self {
        InterpolatedFunction { state: State::Uninitialized }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file_with(path, &LoadOptions::default())
    }

    pub fn from_file_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self> {
        let mut function = Self::new();
        function.load_file_with(path, options)?;
        Ok(function)
    }

    pub fn unity(x_min: f64, x_max: f64) -> Self {
        let mut function = Self::new();
        function.init_unity(x_min, x_max);
        function
    }

    /// Loads two column data from `path` and builds a natural cubic spline over all samples.
    ///
    /// Any previous state is released first, so on error the instance is left uninitialized.
    ///
    /// # Errors
    /// [`Error::MissingFile`] if the file does not exist, [`Error::Read`] if it cannot be read,
    /// and the spline construction errors for fewer than 2 samples or unordered arguments.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.load_file_with(path, &LoadOptions::default())
    }

    pub fn load_file_with<P: AsRef<Path>>(&mut self, path: P, options: &LoadOptions) -> Result<()> {
        self.state = State::Uninitialized;

        let path = path.as_ref();
        let knots = read_two_column(path)?.into_knots(options)?;
        let spline = Spline::new(knots)?;

        debug!(
            "loaded {} knots from {:?}, domain [{}, {}]",
            spline.knots().len(),
            path,
            spline.min_x(),
            spline.max_x()
        );
        self.state = State::Tabulated(spline);
        Ok(())
    }

    /// Sets `f(x) = 1` on `[x_min, x_max]`. The bounds are not validated.
    pub fn init_unity(&mut self, x_min: f64, x_max: f64) {
        self.state = State::Unity { domain: Domain { x_min, x_max } };
    }

    pub fn is_initialized(&self) -> bool {
        !matches!(self.state, State::Uninitialized)
    }

    pub fn is_unity(&self) -> bool {
        matches!(self.state, State::Unity { .. })
    }

    /// Number of tabulated samples; zero unless loaded from data.
    pub fn knot_count(&self) -> usize {
        match &self.state {
            State::Tabulated(spline) => spline.knots().len(),
            _ => 0,
        }
    }

    pub fn domain(&self) -> Option<Domain> {
        match &self.state {
            State::Uninitialized => None,
            State::Unity { domain } => Some(*domain),
            State::Tabulated(spline) => {
                Some(Domain { x_min: spline.min_x(), x_max: spline.max_x() })
            }
        }
    }

    #[track_caller]
    pub fn domain_lower_bound(&self) -> f64 {
        self.expect_domain().lower_bound()
    }

    #[track_caller]
    pub fn domain_upper_bound(&self) -> f64 {
        self.expect_domain().upper_bound()
    }

    /// Function value at `x` without touching the interval lookup cache.
    #[track_caller]
    pub fn evaluate(&self, x: f64) -> f64 {
        match &self.state {
            State::Uninitialized => not_initialized(),
            State::Unity { .. } => 1.0,
            State::Tabulated(spline) => spline.extrapolate(x),
        }
    }

    /// Function value at `x`, remembering the spline interval for the next call. Faster than
    /// [`evaluate`](Self::evaluate) when arguments are swept monotonically.
    #[track_caller]
    pub fn cached_evaluate(&mut self, x: f64) -> f64 {
        match &mut self.state {
            State::Uninitialized => not_initialized(),
            State::Unity { .. } => 1.0,
            State::Tabulated(spline) => spline.cached_extrapolate(x),
        }
    }

    pub fn try_evaluate(&self, x: f64) -> Result<f64> {
        match &self.state {
            State::Uninitialized => Err(Error::Uninitialized),
            State::Unity { .. } => Ok(1.0),
            State::Tabulated(spline) => Ok(spline.extrapolate(x)),
        }
    }

    #[track_caller]
    pub fn batch_evaluate(&self, x_vector: &[f64]) -> Vec<f64> {
        match &self.state {
            State::Uninitialized => not_initialized(),
            State::Unity { .. } => vec![1.0; x_vector.len()],
            State::Tabulated(spline) => spline.batch_extrapolate(x_vector),
        }
    }

    /// `number_of_points` equally spaced `(x, f(x))` pairs starting at
    /// [`domain_lower_bound`](Self::domain_lower_bound) with step
    /// `(upper - lower) / number_of_points`.
    #[track_caller]
    pub fn resample(&self, number_of_points: usize) -> Vec<(f64, f64)> {
        let lower = self.domain_lower_bound();
        let upper = self.domain_upper_bound();
        let step = (upper - lower) / number_of_points as f64;

        let x_vector: Vec<f64> = (0..number_of_points)
            .map(|i| lower + step * i as f64)
            .collect();
        let y_vector = self.batch_evaluate(&x_vector);
        x_vector.into_iter().zip(y_vector).collect()
    }

    #[track_caller]
    fn expect_domain(&self) -> Domain {
        match self.domain() {
            Some(domain) => domain,
            None => not_initialized(),
        }
    }
}

#[track_caller]
fn not_initialized() -> ! {
    panic!("interpolated function is not initialized: call load_file or init_unity first")
}
