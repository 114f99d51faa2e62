use log::trace;
use nalgebra::DVector;

use crate::{
    error::{Error, Result},
    knot::Knot,
    polynomial::Polynomial,
};

// Relative deviation from the mean knot spacing allowed for the uniform lookup fast path.
const UNIFORM_SPACING_TOLERANCE: f64 = 1e-12;

/// Natural cubic spline through a set of knots.
///
/// The second derivative vanishes at both end knots. Two knots give the straight line through them.
/// Knots must have strictly increasing x values.
#[derive(Debug)]
pub struct Spline {
    knots: Vec<Knot>,
    polynomials: Vec<Polynomial>,
    min_x: f64,
    max_x: f64,
    is_knot_spacing_uniform: bool,
    last_interval_cache: usize,
}

impl Spline {
    /// # Example
    /// ```
    /// use tabulated_spline::{Knot, Spline};
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let knots = vec![
    ///     Knot::new(0.0, 0.0),
    ///     Knot::new(1.0, 1.0),
    ///     Knot::new(2.0, 4.0),
    ///     Knot::new(3.0, 9.0),
    /// ];
    /// let spline = Spline::new(knots).unwrap();
    ///
    /// assert_approx_eq!(2.2, spline.interpolate(1.5).unwrap(), 1e-12);
    /// assert!(spline.interpolate(3.5).is_err());
    /// ```
    /// # Errors
    /// [`Error::InsufficientSamples`] for fewer than 2 knots and [`Error::UnorderedKnots`]
    /// when x values are not strictly increasing.
    pub fn new(knots: Vec<Knot>) -> Result<Self> {

        if knots.len() < 2 {
            return Err(Error::InsufficientSamples { count: knots.len() });
        }

        let number_of_intervals = knots.len() - 1;
        let mut spline = Spline {
            min_x: knots[0].x,
            max_x: knots[number_of_intervals].x,
            knots,
            polynomials: Vec::with_capacity(number_of_intervals),
            is_knot_spacing_uniform: false,
            last_interval_cache: 0,
        };

        spline.check_knots_spacing()?;
        spline.calculate_polynomials();
        trace!(
            "built natural spline over {} knots on [{}, {}], uniform spacing: {}",
            spline.knots.len(),
            spline.min_x,
            spline.max_x,
            spline.is_knot_spacing_uniform
        );
        Ok(spline)
    }

    pub fn interpolate(&self, x: f64) -> Result<f64> {
        if self.is_in_range(x) {
            let index = self.find_interval_index(x);
            Ok(self.polynomials[index].evaluate(x))
        } else {
            Err(self.out_of_range(x))
        }
    }

    pub fn cached_interpolate(&mut self, x: f64) -> Result<f64> {
        if self.is_in_range(x) {
            let index = self.find_interval_index_with_cache(x);
            Ok(self.polynomials[index].evaluate(x))
        } else {
            Err(self.out_of_range(x))
        }
    }

    pub fn batch_interpolate(&self, x_vector: &[f64]) -> Result<Vec<f64>> {

        if let Some(x) = x_vector.iter().find(|x| !self.is_in_range(**x)) {
            return Err(self.out_of_range(*x));
        }

        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            index = self.find_interval_index_with_hint(index, *x);
            results.push(self.polynomials[index].evaluate(*x));
        }
        Ok(results)
    }

    /// Flat extrapolation: the first knot value below the range, the last knot value above it.
    pub fn extrapolate(&self, x: f64) -> f64 {

        match self.evaluate_on_boundaries(x) {
            Some(result) => result,
            None => {
                let index = self.find_interval_index(x);
                self.polynomials[index].evaluate(x)
            },
        }
    }

    pub fn cached_extrapolate(&mut self, x: f64) -> f64 {

        match self.evaluate_on_boundaries(x) {
            Some(result) => result,
            None => {
                let index = self.find_interval_index_with_cache(x);
                self.polynomials[index].evaluate(x)
            },
        }
    }

    pub fn batch_extrapolate(&self, x_vector: &[f64]) -> Vec<f64> {

        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            match self.evaluate_on_boundaries(*x) {
                Some(result) => results.push(result),
                None => {
                    index = self.find_interval_index_with_hint(index, *x);
                    results.push(self.polynomials[index].evaluate(*x));
                },
            }
        }
        results
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    fn check_knots_spacing(&mut self) -> Result<()> {

        let x_spacing_vec: Vec<f64> = self.knots
            .windows(2)
            .map(|w| w[1].x - w[0].x)
            .collect();

        // `!(spacing > 0.0)` also catches NaN
        if let Some(position) = x_spacing_vec.iter().position(|spacing| !(*spacing > 0.0)) {
            return Err(Error::UnorderedKnots { index: position + 1 });
        }

        let mean_spacing = (self.max_x - self.min_x) / x_spacing_vec.len() as f64;
        let tolerance = UNIFORM_SPACING_TOLERANCE * mean_spacing;
        self.is_knot_spacing_uniform = x_spacing_vec
            .iter()
            .all(|spacing| (spacing - mean_spacing).abs() <= tolerance);

        Ok(())
    }

    fn calculate_polynomials(&mut self) {
        let second_derivatives = self.calculate_second_derivatives();

        for i in 0..self.knots.len() - 1 {
            let k0 = self.knots[i];
            let k1 = self.knots[i + 1];
            let h = k1.x - k0.x;
            let m0 = second_derivatives[i];
            let m1 = second_derivatives[i + 1];

            let coefficients = [
                k0.y,
                (k1.y - k0.y) / h - h * (2.0 * m0 + m1) / 6.0,
                m0 / 2.0,
                (m1 - m0) / (6.0 * h),
            ];
            self.polynomials.push(Polynomial::new(k0.x, coefficients));
        }
    }

    /// Solves the tridiagonal system for the second derivatives at the interior knots
    /// with the Thomas algorithm. End values stay zero.
    fn calculate_second_derivatives(&self) -> DVector<f64> {
        let size = self.knots.len();
        let mut second_derivatives = DVector::<f64>::zeros(size);
        if size < 3 {
            return second_derivatives;
        }

        let widths = DVector::<f64>::from_iterator(
            size - 1,
            self.knots.windows(2).map(|w| w[1].x - w[0].x),
        );
        let slopes = DVector::<f64>::from_iterator(
            size - 1,
            self.knots.windows(2).map(|w| w[1].y - w[0].y),
        )
        .component_div(&widths);

        let unknowns = size - 2;
        let mut diagonal = DVector::<f64>::zeros(unknowns);
        let mut rhs = DVector::<f64>::zeros(unknowns);
        for row in 0..unknowns {
            diagonal[row] = 2.0 * (widths[row] + widths[row + 1]);
            rhs[row] = 6.0 * (slopes[row + 1] - slopes[row]);
        }

        // row r couples knots r, r+1, r+2 with weights widths[r], diagonal[r], widths[r+1]
        for row in 1..unknowns {
            let factor = widths[row] / diagonal[row - 1];
            diagonal[row] -= factor * widths[row];
            rhs[row] -= factor * rhs[row - 1];
        }

        second_derivatives[unknowns] = rhs[unknowns - 1] / diagonal[unknowns - 1];
        for row in (0..unknowns - 1).rev() {
            second_derivatives[row + 1] =
                (rhs[row] - widths[row + 1] * second_derivatives[row + 2]) / diagonal[row];
        }
        second_derivatives
    }

    fn is_in_range(&self, x: f64) -> bool {
        self.min_x <= x && x <= self.max_x
    }

    fn out_of_range(&self, x: f64) -> Error {
        Error::OutOfRange { x, min: self.min_x, max: self.max_x }
    }

    fn find_interval_index(&self, x: f64) -> usize {
        if self.is_knot_spacing_uniform {
            self.find_interval_index_uniform(x)
        } else {
            self.find_interval_index_bisect(x)
        }
    }

    fn find_interval_index_bisect(&self, x:f64) -> usize {
        let size = self.knots.len();
        let mut min = 0;
        let mut max = size - 1;

        while max - min > 1 {
            let mid = (min + max) / 2;
            if x < self.knots[mid].x {
                max = mid;
            } else {
                min = mid;
            }
        }
        min
    }

    fn find_interval_index_uniform(&self, x:f64) -> usize {
        let last_interval = self.knots.len() - 2;

        let relative_x = (x - self.min_x) / (self.max_x - self.min_x);
        let estimate = (relative_x * (last_interval + 1) as f64).floor().max(0.0) as usize;
        let index = estimate.min(last_interval);

        // rounding may put x one interval off; anything further falls back to bisection
        if self.is_in_interval_range(index, x) {
            index
        } else if index > 0 && self.is_in_interval_range(index - 1, x) {
            index - 1
        } else if index < last_interval && self.is_in_interval_range(index + 1, x) {
            index + 1
        } else {
            self.find_interval_index_bisect(x)
        }
    }

    fn find_interval_index_with_cache(&mut self, x: f64) -> usize {
        self.last_interval_cache = self.find_interval_index_with_hint(self.last_interval_cache, x);
        self.last_interval_cache
    }

    fn find_interval_index_with_hint(&self, index_hint: usize, x: f64) -> usize {

        if !self.is_in_interval_range(index_hint, x) {

            let next = index_hint + 1;
            if next < self.polynomials.len() && self.is_in_interval_range(next, x) {
                return next;
            } else {
                return self.find_interval_index(x);
            }
        }
        index_hint
    }

    fn is_in_interval_range(&self, interval_index: usize, x: f64) -> bool {
        self.knots[interval_index].x <= x && x <= self.knots[interval_index + 1].x
    }

    fn evaluate_on_boundaries(&self, x:f64) -> Option<f64> {
        if x < self.min_x {
            Some(self.knots[0].y)
        } else if x > self.max_x {
            Some(self.knots[self.knots.len() - 1].y)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rand::Rng;

    use super::*;

    fn parabola_knots() -> Vec<Knot> {
        vec![
            Knot::new(0.0, 0.0),
            Knot::new(1.0, 1.0),
            Knot::new(2.0, 4.0),
            Knot::new(3.0, 9.0),
        ]
    }

    #[test]
    fn over_x_squared_samples() {
        let eps = 1e-12;

        let spline = Spline::new(parabola_knots()).unwrap();

        assert!(spline.is_knot_spacing_uniform);

        // natural end conditions: M0 = M3 = 0, M1 = M2 = 2.4
        assert_approx_eq!(spline.interpolate(0.0).unwrap(), 0.0, eps);
        assert_approx_eq!(spline.interpolate(0.5).unwrap(), 0.35, eps);
        assert_approx_eq!(spline.interpolate(1.0).unwrap(), 1.0, eps);
        assert_approx_eq!(spline.interpolate(1.5).unwrap(), 2.2, eps);
        assert_approx_eq!(spline.interpolate(2.0).unwrap(), 4.0, eps);
        assert_approx_eq!(spline.interpolate(2.5).unwrap(), 6.35, eps);
        assert_approx_eq!(spline.interpolate(3.0).unwrap(), 9.0, eps);

        assert!(spline.interpolate(3.0001).is_err());
        assert!(spline.interpolate(-0.0001).is_err());
    }

    #[test]
    fn over_x_squared_samples_with_cache() {
        let eps = 1e-12;

        let mut spline = Spline::new(parabola_knots()).unwrap();

        assert_approx_eq!(spline.cached_interpolate(0.5).unwrap(), 0.35, eps);
        assert_approx_eq!(spline.cached_interpolate(1.5).unwrap(), 2.2, eps);
        assert_approx_eq!(spline.cached_interpolate(2.5).unwrap(), 6.35, eps);
        assert_eq!(2, spline.last_interval_cache);
        assert_approx_eq!(spline.cached_interpolate(0.5).unwrap(), 0.35, eps);
        assert_eq!(0, spline.last_interval_cache);

        assert!(spline.cached_interpolate(4.0).is_err());
    }

    #[test]
    fn over_x_squared_samples_batch() {
        let eps = 1e-12;

        let spline = Spline::new(parabola_knots()).unwrap();

        let x_vector = vec![0.0, 0.5, 1.0, 1.5, 2.5, 3.0];
        let expected = vec![0.0, 0.35, 1.0, 2.2, 6.35, 9.0];
        let result = spline.batch_interpolate(&x_vector).unwrap();

        assert_eq!(x_vector.len(), result.len());
        for i in 0..x_vector.len() {
            assert_approx_eq!(result[i], expected[i], eps);
        }

        assert!(spline.batch_interpolate(&[0.0, 1.0, 3.5]).is_err());
    }

    #[test]
    fn flat_extrapolation() {
        let mut spline = Spline::new(parabola_knots()).unwrap();

        assert_eq!(0.0, spline.extrapolate(-5.0));
        assert_eq!(9.0, spline.extrapolate(100.0));
        assert_eq!(0.0, spline.cached_extrapolate(-1e300));
        assert_eq!(9.0, spline.cached_extrapolate(3.0 + 1e-9));

        let result = spline.batch_extrapolate(&[-1.0, 1.5, 7.0]);
        assert_eq!(0.0, result[0]);
        assert_approx_eq!(2.2, result[1], 1e-12);
        assert_eq!(9.0, result[2]);
    }

    #[test]
    fn two_knots_give_straight_line() {
        let eps = 1e-12;

        let spline = Spline::new(vec![Knot::new(1.0, -2.0), Knot::new(3.0, 4.0)]).unwrap();

        assert_approx_eq!(spline.interpolate(1.0).unwrap(), -2.0, eps);
        assert_approx_eq!(spline.interpolate(2.0).unwrap(), 1.0, eps);
        assert_approx_eq!(spline.interpolate(2.5).unwrap(), 2.5, eps);
        assert_approx_eq!(spline.interpolate(3.0).unwrap(), 4.0, eps);
    }

    #[test]
    fn non_uniform_spacing() {
        let eps = 1e-12;
        let knots = vec![
            Knot::new(0.0, 1.0),
            Knot::new(0.3, -1.0),
            Knot::new(1.7, 2.0),
            Knot::new(2.0, 0.5),
            Knot::new(5.0, 3.0),
        ];

        let spline = Spline::new(knots).unwrap();

        assert!(!spline.is_knot_spacing_uniform);
        for knot in spline.knots() {
            assert_approx_eq!(spline.interpolate(knot.x).unwrap(), knot.y, eps);
        }
    }

    #[test]
    fn interpolation_passes_through_random_knots() {
        let mut rng = rand::thread_rng();
        let mut x = 0.0;
        let mut knots = Vec::new();
        for _ in 0..50 {
            x += rng.gen_range(0.01..2.0);
            knots.push(Knot::new(x, rng.gen_range(-10.0..10.0)));
        }

        let mut spline = Spline::new(knots.clone()).unwrap();

        for knot in knots.iter() {
            assert_approx_eq!(spline.interpolate(knot.x).unwrap(), knot.y, 1e-9);
            assert_approx_eq!(spline.cached_interpolate(knot.x).unwrap(), knot.y, 1e-9);
        }
    }

    #[test]
    fn linear_data_is_reproduced() {
        let mut rng = rand::thread_rng();
        let mut x = -3.0;
        let mut knots = Vec::new();
        for _ in 0..20 {
            x += rng.gen_range(0.05..1.0);
            knots.push(Knot::new(x, 2.0 * x - 1.0));
        }

        let spline = Spline::new(knots).unwrap();

        for _ in 0..200 {
            let x = rng.gen_range(spline.min_x()..=spline.max_x());
            assert_approx_eq!(spline.interpolate(x).unwrap(), 2.0 * x - 1.0, 1e-9);
        }
    }

    #[test]
    fn cache_never_changes_result() {
        let mut rng = rand::thread_rng();
        let knots: Vec<Knot> = (0..30)
            .map(|i| Knot::new(i as f64 * 0.1, rng.gen_range(0.0..5.0)))
            .collect();

        let mut spline = Spline::new(knots).unwrap();

        for _ in 0..500 {
            let x = rng.gen_range(-0.5..3.5);
            assert_approx_eq!(spline.extrapolate(x), spline.cached_extrapolate(x), 1e-12);
        }
    }

    fn drifting_knots(number_of_knots: usize) -> Vec<Knot> {
        let mut x = 0.0;
        (0..number_of_knots)
            .map(|i| {
                let knot = Knot::new(x, (i % 2) as f64);
                x += 1.0 + 3e-8 * i as f64;
                knot
            })
            .collect()
    }

    #[test]
    fn slowly_drifting_spacing_is_not_uniform() {
        let spline = Spline::new(drifting_knots(40_000)).unwrap();

        assert!(!spline.is_knot_spacing_uniform);
        for i in 0..spline.polynomials.len() {
            let x = 0.5 * (spline.knots[i].x + spline.knots[i + 1].x);
            assert_eq!(i, spline.find_interval_index(x));
        }
    }

    #[test]
    fn uniform_lookup_falls_back_when_estimate_is_far_off() {
        let mut spline = Spline::new(drifting_knots(40_000)).unwrap();
        spline.is_knot_spacing_uniform = true;

        for i in (0..spline.polynomials.len()).step_by(7) {
            let x = 0.5 * (spline.knots[i].x + spline.knots[i + 1].x);
            assert_eq!(i, spline.find_interval_index(x));
            assert_eq!(
                spline.polynomials[i].evaluate(x),
                spline.interpolate(x).unwrap()
            );
        }
    }

    #[test]
    fn test_one_knot_error() {
        let spline = Spline::new(vec![Knot::new(0.0, 2.0)]);

        assert!(matches!(spline, Err(Error::InsufficientSamples { count: 1 })));
    }

    #[test]
    fn test_equal_x_knot_values() {
        let knots = vec![Knot::new(0.0, 2.0), Knot::new(0.0, 1.0), Knot::new(1.0, 4.0)];

        let spline = Spline::new(knots);

        assert!(matches!(spline, Err(Error::UnorderedKnots { index: 1 })));
    }

    #[test]
    fn test_descending_x_knot_values() {
        let knots = vec![Knot::new(0.0, 2.0), Knot::new(1.0, 1.0), Knot::new(0.5, 4.0)];

        let spline = Spline::new(knots);

        assert!(matches!(spline, Err(Error::UnorderedKnots { index: 2 })));
    }
}
